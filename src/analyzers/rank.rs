use std::cmp::Ordering;

use tracing::{debug, info};

use crate::analyzers::types::{NeighborhoodStats, RankedNeighborhood, RankedReport};
use crate::analyzers::utility::round_to;

/// Default number of neighborhoods shown in the headline table.
pub const DEFAULT_TOP_N: usize = 10;

/// Barrier count times mean severity, rounded to one decimal.
///
/// Volume and intensity weigh equally: many minor barriers can score the
/// same as a few critical ones.
pub fn barrier_density_index(total_barriers: usize, mean_severity: f64) -> f64 {
    round_to(total_barriers as f64 * mean_severity, 1)
}

/// Highest index first; equal indices fall back to neighborhood name, A to Z.
pub fn by_index_then_name(a: &RankedNeighborhood, b: &RankedNeighborhood) -> Ordering {
    b.barrier_density_index
        .total_cmp(&a.barrier_density_index)
        .then_with(|| a.neighborhood.cmp(&b.neighborhood))
}

/// Scores every neighborhood and sorts them into a [`RankedReport`].
///
/// The result does not depend on the order of `stats`.
#[tracing::instrument(skip(stats), fields(neighborhoods = stats.len()))]
pub fn rank_neighborhoods(stats: Vec<NeighborhoodStats>, top_n: usize) -> RankedReport {
    let mut entries: Vec<RankedNeighborhood> = stats
        .into_iter()
        .map(|s| RankedNeighborhood {
            barrier_density_index: barrier_density_index(s.total_barriers, s.mean_severity),
            neighborhood: s.neighborhood,
            total_barriers: s.total_barriers,
            avg_severity: s.avg_severity,
            mean_severity: s.mean_severity,
        })
        .collect();

    entries.sort_by(by_index_then_name);

    for (i, entry) in entries.iter().enumerate() {
        debug!(
            rank = i + 1,
            neighborhood = %entry.neighborhood,
            index = entry.barrier_density_index,
            "Ranked neighborhood"
        );
    }

    let report = RankedReport::new(entries, top_n);
    info!(
        ranked = report.len(),
        shown = report.top().len(),
        "Neighborhoods ranked"
    );
    report
}
