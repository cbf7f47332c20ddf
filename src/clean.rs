//! Severity imputation and coordinate filtering.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::normalize::BarrierRecord;

/// A barrier observation that survived cleaning.
///
/// Severity is always present and within 1 to 5; an imputed median may fall
/// halfway between two levels. The coordinate pair is never the `(0, 0)`
/// sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    pub row: usize,
    pub longitude: f64,
    pub latitude: f64,
    pub label_type: Option<String>,
    pub neighborhood: Option<String>,
    pub severity: f64,
    /// `None` when the survey did not record permanence.
    pub is_temporary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub records: Vec<CleanedRecord>,
    /// Severity value written into rows that had none.
    pub imputed_value: Option<f64>,
    /// Rows across the whole input whose severity was imputed.
    pub imputed: usize,
    /// Rows removed by the coordinate filter.
    pub dropped: usize,
}

impl CleaningOutcome {
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

/// Median of the observed severities.
///
/// With an even number of observations this is the mean of the two middle
/// values, so `[3, 4]` gives `3.5`.
pub fn median_severity(records: &[BarrierRecord]) -> Option<f64> {
    let mut observed: Vec<u8> = records.iter().filter_map(|r| r.severity).collect();
    if observed.is_empty() {
        return None;
    }
    observed.sort_unstable();

    let mid = observed.len() / 2;
    if observed.len() % 2 == 0 {
        Some((f64::from(observed[mid - 1]) + f64::from(observed[mid])) / 2.0)
    } else {
        Some(f64::from(observed[mid]))
    }
}

/// Returns the coordinate pair if it is a usable location.
pub fn valid_coordinates(longitude: Option<f64>, latitude: Option<f64>) -> Option<(f64, f64)> {
    match (longitude, latitude) {
        (Some(lon), Some(lat)) if !(lon == 0.0 && lat == 0.0) => Some((lon, lat)),
        _ => None,
    }
}

/// Imputes missing severities with the dataset-wide median, then drops rows
/// without a usable location.
///
/// The median is taken over every input row, including rows the coordinate
/// filter later removes.
#[tracing::instrument(skip_all, fields(rows = records.len()))]
pub fn clean(records: &[BarrierRecord]) -> Result<CleaningOutcome> {
    let imputed = records.iter().filter(|r| r.severity.is_none()).count();
    let median = median_severity(records);

    if imputed > 0 && median.is_none() {
        return Err(PipelineError::NoObservedSeverity);
    }
    debug!(imputed, median = ?median, "Severity median computed");

    let mut cleaned = Vec::with_capacity(records.len());
    for r in records {
        let Some((longitude, latitude)) = valid_coordinates(r.longitude, r.latitude) else {
            continue;
        };

        cleaned.push(CleanedRecord {
            row: r.row,
            longitude,
            latitude,
            label_type: r.label_type.clone(),
            neighborhood: r.neighborhood.clone(),
            severity: r
                .severity
                .map(f64::from)
                .or(median)
                .ok_or(PipelineError::NoObservedSeverity)?,
            is_temporary: r.is_temporary,
        });
    }

    let dropped = records.len() - cleaned.len();
    info!(imputed, "Imputed missing severity values");
    info!(remaining = cleaned.len(), dropped, "Clean data");

    if cleaned.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    Ok(CleaningOutcome {
        records: cleaned,
        imputed_value: if imputed > 0 { median } else { None },
        imputed,
        dropped,
    })
}
