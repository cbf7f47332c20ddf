//! End-to-end run: normalize, clean, aggregate, rank.
//!
//! Each stage takes the previous stage's output by reference and returns a
//! new value; nothing is shared or mutated between stages.

use tracing::info;

use crate::analyzers::aggregate::aggregate_neighborhoods;
use crate::analyzers::rank::rank_neighborhoods;
use crate::analyzers::types::RankedReport;
use crate::clean::{CleaningOutcome, clean};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetch::load_source;
use crate::normalize::normalize;
use crate::parser::{RawDataset, parse_csv};

/// Everything a run produces, handed to the exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub loaded: usize,
    pub cleaning: CleaningOutcome,
    /// Cleaned records left out of aggregation for lacking a neighborhood.
    pub without_neighborhood: usize,
    pub report: RankedReport,
}

/// Runs every stage over an already-parsed dataset.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn run(dataset: &RawDataset, config: &PipelineConfig) -> Result<PipelineRun> {
    let records = normalize(dataset)?;
    info!(loaded = records.len(), "Loaded rows");

    let cleaning = clean(&records)?;
    let aggregation = aggregate_neighborhoods(&cleaning.records, config.missing_neighborhood)?;
    let report = rank_neighborhoods(aggregation.stats, config.top_n);

    Ok(PipelineRun {
        loaded: records.len(),
        cleaning,
        without_neighborhood: aggregation.dropped,
        report,
    })
}

/// Reads `source` (path, `.gz` path or URL) and runs the pipeline on it.
pub fn run_source(source: &str, config: &PipelineConfig) -> Result<PipelineRun> {
    let bytes = load_source(source)?;
    let dataset = parse_csv(&bytes)?;
    run(&dataset, config)
}
