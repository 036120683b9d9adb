use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use odt_styler_cli::summary::print_file_outcome;
use odt_styler_core::{BatchOptions, BatchProcessor, BatchReport, discover};
use odt_styler_model::load_rules;

use crate::cli::Cli;

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_FILE_FAILURES: i32 = 2;

pub const NO_MATCHES: &str = "No files matched the pattern.";

/// Load rules, resolve the file pattern and process every match.
///
/// Returns `None` when the pattern matched nothing.
pub fn run_batch(cli: &Cli) -> Result<Option<BatchReport>> {
    let span = info_span!("run", pattern = %cli.pattern, config = %cli.config.display());
    let _guard = span.enter();

    let specs = load_rules(&cli.config)
        .with_context(|| format!("load rules from {}", cli.config.display()))?;
    let options = BatchOptions {
        suffix: cli.suffix.clone(),
        dry_run: cli.dry_run,
    };
    let processor = BatchProcessor::from_specs(&specs, options).context("build modifiers")?;
    info!(rule_count = specs.len(), "rules loaded");

    let files = discover(&cli.pattern).context("resolve file pattern")?;
    Ok(process_matches(&processor, &files))
}

fn process_matches(processor: &BatchProcessor, files: &[PathBuf]) -> Option<BatchReport> {
    if files.is_empty() {
        println!("{NO_MATCHES}");
        return None;
    }
    Some(processor.run_with(files, print_file_outcome))
}

/// Process exit code for a finished run.
pub fn exit_code(outcome: &Result<Option<BatchReport>>) -> i32 {
    match outcome {
        Ok(Some(report)) if report.has_failures() => EXIT_FILE_FAILURES,
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_ERROR,
    }
}
