pub mod analyzers;
pub mod clean;
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;

pub use error::{PipelineError, Result};
