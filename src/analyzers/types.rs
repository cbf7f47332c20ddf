//! Data types produced by aggregation and ranking.

use serde::Serialize;

/// Per-neighborhood barrier summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodStats {
    pub neighborhood: String,
    pub total_barriers: usize,
    /// Mean severity rounded to two decimals, for display.
    pub avg_severity: f64,
    /// Unrounded mean severity, used for the density index.
    #[serde(skip)]
    pub mean_severity: f64,
}

/// One row of the ranked table. Serializes to the exported CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNeighborhood {
    pub neighborhood: String,
    pub total_barriers: usize,
    pub avg_severity: f64,
    pub barrier_density_index: f64,
    #[serde(skip)]
    pub mean_severity: f64,
}

/// Neighborhoods ordered from highest to lowest Barrier Density Index.
///
/// Read-only once built; see [`crate::analyzers::rank::rank_neighborhoods`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReport {
    top_n: usize,
    entries: Vec<RankedNeighborhood>,
}

impl RankedReport {
    pub(crate) fn new(entries: Vec<RankedNeighborhood>, top_n: usize) -> Self {
        Self { top_n, entries }
    }

    /// Every neighborhood, in rank order.
    pub fn entries(&self) -> &[RankedNeighborhood] {
        &self.entries
    }

    /// The first `top_n` entries, or all of them if there are fewer.
    pub fn top(&self) -> &[RankedNeighborhood] {
        &self.entries[..self.top_n.min(self.entries.len())]
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_barriers(&self) -> usize {
        self.entries.iter().map(|e| e.total_barriers).sum()
    }
}
