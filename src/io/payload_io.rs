use std::fs;
use std::path::{Path, PathBuf};

use crate::model::payload::Payload;

/// Error type for payload and config I/O
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse payload: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("could not parse config: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

/// Load and parse the static directory payload from disk.
pub fn load_payload(path: &Path) -> Result<Payload, PayloadError> {
    let text = fs::read_to_string(path).map_err(|e| PayloadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let payload: Payload = serde_json::from_str(&text)?;
    Ok(payload)
}
