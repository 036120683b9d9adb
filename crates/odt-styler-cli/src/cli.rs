//! CLI argument definitions for the ODF styler.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use odt_styler_core::DEFAULT_SUFFIX;

#[derive(Parser)]
#[command(
    name = "odt-styler",
    version,
    about = "Batch-apply styles to OpenDocument text files",
    long_about = "Import named styles from a reference document and apply styles to text \
                  matching regular expressions, across every .odt file matching a glob.\n\n\
                  Each input is written to a new file next to it; originals are never modified."
)]
pub struct Cli {
    /// Glob selecting the files to process (e.g. "docs/*.odt", "**/*.odt").
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// JSON rule file.
    #[arg(long, value_name = "PATH", default_value = "rules.json")]
    pub config: PathBuf,

    /// List the files that would be processed without opening or writing them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Inserted between each output file's stem and extension.
    #[arg(
        long,
        value_name = "SUFFIX",
        default_value = DEFAULT_SUFFIX,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub suffix: String,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["odt-styler", "*.odt"]).unwrap();
        assert_eq!(cli.pattern, "*.odt");
        assert_eq!(cli.config, PathBuf::from("rules.json"));
        assert_eq!(cli.suffix, "_EDITED");
        assert!(!cli.dry_run);
    }

    #[test]
    fn empty_suffix_is_rejected() {
        assert!(Cli::try_parse_from(["odt-styler", "*.odt", "--suffix", ""]).is_err());
    }
}
