//! CSV parser for the raw barrier survey.

use std::collections::HashMap;

use csv::{ReaderBuilder, Trim};

use crate::error::Result;

/// Cell contents read as "no value", in addition to the empty cell.
/// Matched exactly; cells are never trimmed.
const NULL_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// One survey row keyed by source column path. Null cells are absent.
pub type RawRecord = HashMap<String, String>;

/// The whole snapshot as read from storage, before any renaming.
#[derive(Debug, Default, Clone)]
pub struct RawDataset {
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

fn is_null(cell: &str) -> bool {
    cell.is_empty() || NULL_MARKERS.contains(&cell)
}

/// Decodes CSV bytes with a header row into a [`RawDataset`].
///
/// # Errors
///
/// Returns an error if the bytes are not valid CSV or a row has a different
/// number of fields than the header.
pub fn parse_csv(bytes: &[u8]) -> Result<RawDataset> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(bytes);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result?;
        let record: RawRecord = columns
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !is_null(cell))
            .map(|(column, cell)| (column.clone(), cell.to_string()))
            .collect();
        records.push(record);
    }

    Ok(RawDataset { columns, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_only() {
        let dataset = parse_csv(b"a,b,c\n").unwrap();
        assert_eq!(dataset.columns, vec!["a", "b", "c"]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_parse_drops_null_cells() {
        let dataset = parse_csv(b"a,b,c\n1,,NaN\n").unwrap();
        assert_eq!(dataset.len(), 1);

        let row = &dataset.records[0];
        assert_eq!(row.get("a").map(String::as_str), Some("1"));
        assert!(!row.contains_key("b"));
        assert!(!row.contains_key("c"));
    }

    #[test]
    fn test_parse_keeps_nested_column_names() {
        let dataset = parse_csv(b" geometry/coordinates/0,properties/neighborhood\n-122.3,Ballard\n").unwrap();
        assert!(dataset.has_column("geometry/coordinates/0"));
        assert_eq!(
            dataset.records[0].get("properties/neighborhood").map(String::as_str),
            Some("Ballard")
        );
    }

    #[test]
    fn test_parse_keeps_cell_whitespace() {
        let dataset = parse_csv(b"a,b,c\n Ballard ,   ,x\n").unwrap();
        let row = &dataset.records[0];

        assert_eq!(row.get("a").map(String::as_str), Some(" Ballard "));
        assert_eq!(row.get("b").map(String::as_str), Some("   "));
    }

    #[test]
    fn test_parse_ragged_row_is_error() {
        let result = parse_csv(b"a,b\n1,2,3\n");
        assert!(result.is_err());
    }
}
