//! Modifiers and the batch runner for the ODF styler.

pub mod discover;
pub mod error;
pub mod modifier;
pub mod pipeline;

pub use discover::discover;
pub use error::{CoreError, Result};
pub use modifier::{Modifier, RegexSpan, StyleImport};
pub use pipeline::{
    BatchOptions, BatchProcessor, BatchReport, DEFAULT_SUFFIX, FileOutcome, output_path,
};
