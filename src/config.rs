use anyhow::{Context, Result};
use serde::Deserialize;

/// What aggregation does with a cleaned record that has no neighborhood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingNeighborhoodPolicy {
    /// Skip the record and report how many were skipped.
    #[default]
    Drop,
    /// Abort the run with a missing-group-key error.
    Fail,
}

/// Tunables for a pipeline run.
///
/// Stored as a JSON object on disk; any field may be omitted:
/// ```json
/// {
///   "top_n": 10,
///   "missing_neighborhood": "drop",
///   "severe_threshold": 5,
///   "max_hotspots": 900,
///   "top_label_types": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub top_n: usize,
    pub missing_neighborhood: MissingNeighborhoodPolicy,
    /// Minimum severity plotted as a hotspot marker.
    pub severe_threshold: u8,
    pub max_hotspots: usize,
    pub top_label_types: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            missing_neighborhood: MissingNeighborhoodPolicy::Drop,
            severe_threshold: 5,
            max_hotspots: 900,
            top_label_types: 5,
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{path}'"))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file '{path}'"))?;
        Ok(config)
    }

    /// Loads from `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.missing_neighborhood, MissingNeighborhoodPolicy::Drop);
        assert_eq!(config.severe_threshold, 5);
        assert_eq!(config.max_hotspots, 900);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"top_n": 3, "missing_neighborhood": "fail"}"#).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.missing_neighborhood, MissingNeighborhoodPolicy::Fail);
        assert_eq!(config.top_label_types, 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: serde_json::Result<PipelineConfig> = serde_json::from_str(r#"{"topn": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("sidewalk_risk_config_test.json");
        fs::write(&path, r#"{"max_hotspots": 12}"#).unwrap();

        let config = PipelineConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.max_hotspots, 12);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(PipelineConfig::load("/no/such/config.json").is_err());
    }
}
