//! Console output for per-file results and the final summary.

use std::path::PathBuf;

use odt_styler_cli::summary::{file_lines, summary_table};
use odt_styler_core::FileOutcome;
use odt_styler_model::{ActionLog, Outcome, Totals};
use odt_styler_odf::OdfError;

fn logs() -> Vec<ActionLog> {
    vec![
        ActionLog::new("Import text style: Bold", Outcome::Success),
        ActionLog::new("Applied 'Bold'", Outcome::MatchCount(1)),
    ]
}

#[test]
fn processed_file_lists_each_modifier() {
    let outcome = FileOutcome::Processed {
        path: PathBuf::from("docs/memo.odt"),
        output: PathBuf::from("docs/memo_EDITED.odt"),
        logs: logs(),
    };
    insta::assert_snapshot!(file_lines(&outcome).join("\n"), @r"
    Processing: memo.odt
      Import text style: Bold -> Success
      Applied 'Bold' -> 1
    ");
}

#[test]
fn dry_run_is_one_line() {
    let outcome = FileOutcome::DryRun {
        path: PathBuf::from("docs/memo.odt"),
    };
    assert_eq!(
        file_lines(&outcome),
        vec!["[DRY RUN] Would process: memo.odt"]
    );
}

#[test]
fn failed_open_prints_heading_only() {
    let outcome = FileOutcome::Failed {
        path: PathBuf::from("broken.odt"),
        error: OdfError::MissingPart {
            part: "content.xml".to_string(),
        },
        logs: Vec::new(),
    };
    assert_eq!(file_lines(&outcome), vec!["Processing: broken.odt"]);
}

#[test]
fn summary_table_has_one_row_per_label() {
    let mut totals = Totals::new();
    totals.record_logs(&logs());
    totals.record("Import paragraph style: Quote", &Outcome::NotFound);
    totals.record("Applied 'Bold'", &Outcome::MatchCount(2));

    let mut table = summary_table(&totals);
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("MODIFICATION"));
    assert!(rendered.contains("RESULT"));
    for expected in [
        "Import text style: Bold",
        "Success",
        "Applied 'Bold'",
        "Not found in source",
    ] {
        assert!(rendered.contains(expected), "missing {expected}:\n{rendered}");
    }
    let count_row = rendered
        .lines()
        .find(|line| line.contains("Applied 'Bold'"))
        .unwrap();
    assert!(count_row.contains(" 3 "));
    assert_eq!(table.row_count(), 3);
}

#[test]
fn empty_totals_render_header_only() {
    let mut table = summary_table(&Totals::new());
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 2);
}
