//! Library side of the `odt-styler` binary: logging setup and report output.

pub mod logging;
pub mod summary;
