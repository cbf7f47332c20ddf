//! Renames the survey's nested source columns to canonical barrier attributes.

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::parser::{RawDataset, RawRecord};

pub const LONGITUDE: &str = "geometry/coordinates/0";
pub const LATITUDE: &str = "geometry/coordinates/1";
pub const LABEL_TYPE: &str = "properties/label_type";
pub const NEIGHBORHOOD: &str = "properties/neighborhood";
pub const SEVERITY: &str = "properties/severity";
pub const IS_TEMPORARY: &str = "properties/is_temporary";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    LONGITUDE,
    LATITUDE,
    LABEL_TYPE,
    NEIGHBORHOOD,
    SEVERITY,
    IS_TEMPORARY,
];

/// A survey row under canonical names. Every attribute may still be null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarrierRecord {
    /// 1-based data row, used in error messages.
    pub row: usize,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub label_type: Option<String>,
    pub neighborhood: Option<String>,
    pub severity: Option<u8>,
    pub is_temporary: Option<bool>,
}

/// Fails with [`PipelineError::Schema`] listing every required column the
/// header lacks.
pub fn check_schema(dataset: &RawDataset) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !dataset.has_column(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Schema { missing })
    }
}

/// Validates the header, then renames every row.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn normalize(dataset: &RawDataset) -> Result<Vec<BarrierRecord>> {
    check_schema(dataset)?;

    let records = dataset
        .records
        .iter()
        .enumerate()
        .map(|(i, raw)| normalize_record(i + 1, raw))
        .collect::<Result<Vec<_>>>()?;

    debug!(records = records.len(), "Rows normalized");
    Ok(records)
}

/// Copies the six source fields of one row into a [`BarrierRecord`].
pub fn normalize_record(row: usize, raw: &RawRecord) -> Result<BarrierRecord> {
    Ok(BarrierRecord {
        row,
        longitude: parse_coordinate(row, LONGITUDE, raw.get(LONGITUDE))?,
        latitude: parse_coordinate(row, LATITUDE, raw.get(LATITUDE))?,
        label_type: raw.get(LABEL_TYPE).cloned(),
        neighborhood: raw.get(NEIGHBORHOOD).cloned(),
        severity: parse_severity(row, raw.get(SEVERITY))?,
        is_temporary: parse_flag(row, raw.get(IS_TEMPORARY))?,
    })
}

fn invalid(row: usize, column: &'static str, value: &str) -> PipelineError {
    PipelineError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

fn parse_coordinate(row: usize, column: &'static str, value: Option<&String>) -> Result<Option<f64>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(v) if v.is_nan() => Ok(None),
        _ => Err(invalid(row, column, value)),
    }
}

/// Severity arrives as `4` or `4.0`; only whole numbers 1 to 5 are accepted.
fn parse_severity(row: usize, value: Option<&String>) -> Result<Option<u8>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) if v.fract() == 0.0 && (1.0..=5.0).contains(&v) => Ok(Some(v as u8)),
        _ => Err(invalid(row, SEVERITY, value)),
    }
}

fn parse_flag(row: usize, value: Option<&String>) -> Result<Option<bool>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        _ => Err(invalid(row, IS_TEMPORARY, value)),
    }
}
