use thiserror::Error;

/// Errors raised while setting up a batch. Per-file failures are reported in
/// the batch report instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("invalid pattern for style '{style_name}': {source}")]
    InvalidPattern {
        style_name: String,
        source: regex::Error,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("output suffix must not be empty: the input file would be overwritten")]
    EmptySuffix,
}

pub type Result<T> = std::result::Result<T, CoreError>;
