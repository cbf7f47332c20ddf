use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::analyzers::types::NeighborhoodStats;
use crate::analyzers::utility::{mean, round_to};
use crate::clean::CleanedRecord;
use crate::config::MissingNeighborhoodPolicy;
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationOutcome {
    pub stats: Vec<NeighborhoodStats>,
    /// Records skipped for lacking a neighborhood under the `drop` policy.
    pub dropped: usize,
}

/// Groups cleaned records by exact neighborhood string and summarizes each
/// group into a [`NeighborhoodStats`].
///
/// Neighborhoods are discovered from the data; no group is produced for a
/// name that never appears. Records without a neighborhood are handled by
/// `policy`.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub fn aggregate_neighborhoods(
    records: &[CleanedRecord],
    policy: MissingNeighborhoodPolicy,
) -> Result<AggregationOutcome> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(neighborhood) = record.neighborhood.as_deref() else {
            match policy {
                MissingNeighborhoodPolicy::Drop => {
                    dropped += 1;
                    continue;
                }
                MissingNeighborhoodPolicy::Fail => {
                    return Err(PipelineError::MissingGroupKey { row: record.row });
                }
            }
        };

        groups
            .entry(neighborhood)
            .or_default()
            .push(record.severity);
    }

    if dropped > 0 {
        warn!(dropped, "Dropped records without a neighborhood");
    }

    if groups.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let stats: Vec<NeighborhoodStats> = groups
        .into_iter()
        .map(|(neighborhood, severities)| {
            let mean_severity = mean(&severities);
            NeighborhoodStats {
                neighborhood: neighborhood.to_string(),
                total_barriers: severities.len(),
                avg_severity: round_to(mean_severity, 2),
                mean_severity,
            }
        })
        .collect();

    debug!(neighborhoods = stats.len(), "Neighborhoods aggregated");

    Ok(AggregationOutcome { stats, dropped })
}
