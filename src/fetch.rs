//! One-shot loading of the survey snapshot from disk or over HTTP.

use std::io::Read;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::Result;

/// Downloads the body at `url` with a blocking client.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads the dataset from a local file path or fetches it over HTTP.
///
/// Sources ending in `.gz` are gunzipped after reading.
#[tracing::instrument]
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        fetch_bytes(source)?
    } else {
        std::fs::read(source)?
    };
    debug!(bytes = bytes.len(), "Source bytes read");

    if source.ends_with(".gz") {
        decompress(&bytes)
    } else {
        Ok(bytes)
    }
}

/// Inflates a gzip stream held in memory.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out)?;
    debug!(compressed = bytes.len(), inflated = out.len(), "Gzip source inflated");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_load_source_missing_file_is_error() {
        let result = load_source("/definitely/not/here/survey.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_source_plain_file() {
        let path = temp_path("sidewalk_risk_fetch_plain.csv");
        fs::write(&path, b"a,b\n1,2\n").unwrap();

        let bytes = load_source(&path).unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_source_gzip_file() {
        let path = temp_path("sidewalk_risk_fetch_gzip.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"a,b\n1,2\n").unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let bytes = load_source(&path).unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_decompress_rejects_plain_bytes() {
        assert!(decompress(b"not gzip at all").is_err());
    }
}
