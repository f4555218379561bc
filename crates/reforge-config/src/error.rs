//! Configuration errors.
//!
//! These never escape [`crate::ConfigLoader::load`]; a failed layer is logged
//! and the loader falls back to the next source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
