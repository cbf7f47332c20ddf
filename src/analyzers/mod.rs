//! Neighborhood aggregation and risk ranking.
//!
//! Cleaned barrier records are grouped by neighborhood, summarized into
//! counts and mean severities, and ranked by the Barrier Density Index
//! (barrier count times mean severity).

pub mod aggregate;
pub mod rank;
pub mod types;
pub mod utility;
