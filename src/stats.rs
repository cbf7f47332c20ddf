use std::collections::HashMap;

use serde::Serialize;

use crate::clean::CleanedRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label_type: String,
    pub count: usize,
}

/// Make-up of the cleaned barriers: permanence split and commonest types.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BarrierComposition {
    pub total: usize,
    pub permanent: usize,
    pub temporary: usize,
    /// Records with no permanence flag; left out of both shares.
    pub unflagged: usize,

    // records with no label are not counted
    pub labelled: usize,
    pub top_label_types: Vec<LabelCount>,
}

impl BarrierComposition {
    /// Tallies permanence and label types, keeping the `top_k` most common
    /// labels (equal counts ordered by label).
    pub fn from_records(records: &[CleanedRecord], top_k: usize) -> Self {
        let mut s = BarrierComposition {
            total: records.len(),
            ..Default::default()
        };

        let mut label_counts: HashMap<&str, usize> = HashMap::new();

        for r in records {
            match r.is_temporary {
                Some(true) => s.temporary += 1,
                Some(false) => s.permanent += 1,
                None => s.unflagged += 1,
            }

            if let Some(label) = r.label_type.as_deref() {
                s.labelled += 1;
                *label_counts.entry(label).or_default() += 1;
            }
        }

        let mut labels: Vec<LabelCount> = label_counts
            .into_iter()
            .map(|(label_type, count)| LabelCount {
                label_type: label_type.to_string(),
                count,
            })
            .collect();
        labels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label_type.cmp(&b.label_type)));
        labels.truncate(top_k);
        s.top_label_types = labels;

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn permanent_pct(&self) -> f64 {
        Self::pct(self.permanent, self.permanent + self.temporary)
    }

    pub fn temporary_pct(&self) -> f64 {
        Self::pct(self.temporary, self.permanent + self.temporary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(BarrierComposition::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(BarrierComposition::pct(50, 100), 50.0);
        assert_eq!(BarrierComposition::pct(1, 4), 25.0);
    }

    #[test]
    fn test_from_records_empty() {
        let s = BarrierComposition::from_records(&[], 5);

        assert_eq!(s.total, 0);
        assert_eq!(s.permanent_pct(), 0.0);
        assert!(s.top_label_types.is_empty());
    }

    #[test]
    fn test_permanence_split() {
        let records = vec![
            record(Some("Obstacle"), true),
            record(Some("Obstacle"), false),
            record(Some("CurbRamp"), false),
            record(Some("CurbRamp"), false),
        ];

        let s = BarrierComposition::from_records(&records, 5);

        assert_eq!(s.temporary, 1);
        assert_eq!(s.permanent, 3);
        assert_eq!(s.temporary_pct(), 25.0);
        assert_eq!(s.permanent_pct(), 75.0);
    }

    #[test]
    fn test_unflagged_records_excluded_from_shares() {
        let mut records = vec![
            record(Some("Obstacle"), true),
            record(Some("Obstacle"), false),
            record(Some("CurbRamp"), false),
            record(Some("CurbRamp"), false),
        ];
        records[3].is_temporary = None;

        let s = BarrierComposition::from_records(&records, 5);

        assert_eq!(s.total, 4);
        assert_eq!(s.unflagged, 1);
        assert!((s.temporary_pct() - 100.0 / 3.0).abs() < 1e-9);
        assert!((s.permanent_pct() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_labels_ordered_and_truncated() {
        let records = vec![
            record(Some("SurfaceProblem"), false),
            record(Some("Obstacle"), false),
            record(Some("SurfaceProblem"), false),
            record(Some("Obstacle"), false),
            record(Some("NoSidewalk"), false),
            record(Some("CurbRamp"), false),
            record(None, false),
        ];

        let s = BarrierComposition::from_records(&records, 3);

        assert_eq!(s.labelled, 6);
        assert_eq!(
            s.top_label_types,
            vec![
                LabelCount { label_type: "Obstacle".into(), count: 2 },
                LabelCount { label_type: "SurfaceProblem".into(), count: 2 },
                LabelCount { label_type: "CurbRamp".into(), count: 1 },
            ]
        );
    }

    // Helper functions for tests
    fn record(label_type: Option<&str>, is_temporary: bool) -> CleanedRecord {
        CleanedRecord {
            row: 1,
            longitude: -122.3,
            latitude: 47.6,
            label_type: label_type.map(str::to_string),
            neighborhood: Some("Ballard".to_string()),
            severity: 3.0,
            is_temporary: Some(is_temporary),
        }
    }
}
