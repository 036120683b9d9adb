//! Batch runner: apply every modifier to every file, in order.

use std::path::{Path, PathBuf};
use std::time::Instant;

use odt_styler_model::{ActionLog, ModificationSpec, Totals};
use odt_styler_odf::{OdfDocument, OdfError};
use tracing::{info, info_span, warn};

use crate::error::{CoreError, Result};
use crate::modifier::Modifier;

pub const DEFAULT_SUFFIX: &str = "_EDITED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Inserted between the file stem and its extension.
    pub suffix: String,
    /// Announce files without opening or writing anything.
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    DryRun {
        path: PathBuf,
    },
    Processed {
        path: PathBuf,
        output: PathBuf,
        logs: Vec<ActionLog>,
    },
    /// The file could not be opened or saved. `logs` holds whatever the
    /// modifiers reported before a failed save.
    Failed {
        path: PathBuf,
        error: OdfError,
        logs: Vec<ActionLog>,
    },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::DryRun { path } | Self::Processed { path, .. } | Self::Failed { path, .. } => {
                path
            }
        }
    }

    pub fn logs(&self) -> &[ActionLog] {
        match self {
            Self::DryRun { .. } => &[],
            Self::Processed { logs, .. } | Self::Failed { logs, .. } => logs,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
    pub totals: Totals,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|file| file.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Runs a fixed list of modifiers over a list of files.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    modifiers: Vec<Modifier>,
    options: BatchOptions,
}

impl BatchProcessor {
    /// Fails with [`CoreError::EmptySuffix`] unless dry-running, since an
    /// empty suffix would save over every input.
    pub fn new(modifiers: Vec<Modifier>, options: BatchOptions) -> Result<Self> {
        if options.suffix.is_empty() && !options.dry_run {
            return Err(CoreError::EmptySuffix);
        }
        Ok(Self { modifiers, options })
    }

    /// Build the modifiers for `specs`. Fails on the first invalid pattern,
    /// before any file is touched.
    pub fn from_specs(specs: &[ModificationSpec], options: BatchOptions) -> Result<Self> {
        Self::new(Modifier::from_specs(specs)?, options)
    }

    pub fn run(&self, files: &[PathBuf]) -> BatchReport {
        self.run_with(files, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_file` as each file finishes.
    pub fn run_with<F>(&self, files: &[PathBuf], mut on_file: F) -> BatchReport
    where
        F: FnMut(&FileOutcome),
    {
        let span = info_span!(
            "batch",
            file_count = files.len(),
            modifier_count = self.modifiers.len(),
            dry_run = self.options.dry_run
        );
        let _guard = span.enter();
        let start = Instant::now();

        let mut report = BatchReport::default();
        for path in files {
            let outcome = self.process_file(path);
            report.totals.record_logs(outcome.logs());
            on_file(&outcome);
            report.files.push(outcome);
        }

        info!(
            processed = report.files.len(),
            failed = report.failures().count(),
            duration_ms = start.elapsed().as_millis(),
            "batch complete"
        );
        report
    }

    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let span = info_span!("file", path = %path.display());
        let _guard = span.enter();
        if self.options.dry_run {
            info!("dry run, not opened");
            return FileOutcome::DryRun {
                path: path.to_path_buf(),
            };
        }

        let mut document = match OdfDocument::open(path) {
            Ok(document) => document,
            Err(error) => {
                warn!(%error, "cannot open document");
                return FileOutcome::Failed {
                    path: path.to_path_buf(),
                    error,
                    logs: Vec::new(),
                };
            }
        };
        let logs: Vec<ActionLog> = self
            .modifiers
            .iter()
            .flat_map(|modifier| modifier.apply(&mut document))
            .collect();

        let output = output_path(path, &self.options.suffix);
        match document.save(&output) {
            Ok(()) => {
                info!(output = %output.display(), "saved");
                FileOutcome::Processed {
                    path: path.to_path_buf(),
                    output,
                    logs,
                }
            }
            Err(error) => {
                warn!(%error, "cannot save document");
                FileOutcome::Failed {
                    path: path.to_path_buf(),
                    error,
                    logs,
                }
            }
        }
    }
}

/// `<dir>/<stem><suffix><.ext>` next to `path`.
pub fn output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(extension) => format!("{stem}{suffix}.{}", extension.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_inserts_suffix_before_extension() {
        assert_eq!(
            output_path(Path::new("docs/report.odt"), "_EDITED"),
            PathBuf::from("docs/report_EDITED.odt")
        );
        assert_eq!(
            output_path(Path::new("notes"), "_v2"),
            PathBuf::from("notes_v2")
        );
        assert_eq!(
            output_path(Path::new("a/archive.tar.odt"), "-x"),
            PathBuf::from("a/archive.tar-x.odt")
        );
    }

    #[test]
    fn missing_file_fails_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![dir.path().join("one.odt"), dir.path().join("two.odt")];
        let processor = BatchProcessor::new(Vec::new(), BatchOptions::default()).unwrap();

        let mut seen = 0;
        let report = processor.run_with(&files, |_| seen += 1);

        assert_eq!(seen, 2);
        assert_eq!(report.failures().count(), 2);
        assert!(report.totals.is_empty());
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let options = BatchOptions {
            suffix: String::new(),
            dry_run: false,
        };
        let err = BatchProcessor::new(Vec::new(), options.clone()).unwrap_err();
        assert!(matches!(err, CoreError::EmptySuffix));

        let dry_run = BatchOptions {
            dry_run: true,
            ..options
        };
        assert!(BatchProcessor::new(Vec::new(), dry_run).is_ok());
    }
}
