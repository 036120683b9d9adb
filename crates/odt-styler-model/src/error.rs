use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a rule file. All of them are fatal: the batch
/// never starts when the configuration is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse rule file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rule {index}: style_name must not be empty")]
    EmptyStyleName { index: usize },
    #[error("rule {index} ('{style_name}'): source_file must not be empty")]
    EmptySourceFile { index: usize, style_name: String },
    #[error("rule {index} ('{style_name}'): invalid pattern: {source}")]
    InvalidPattern {
        index: usize,
        style_name: String,
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
