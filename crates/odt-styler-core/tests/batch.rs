//! End-to-end batch runs over files on disk.

mod common;

use common::{BOLD, all_spans};
use odt_styler_core::{BatchOptions, BatchProcessor, CoreError, FileOutcome, discover};
use odt_styler_model::{Outcome, parse_rules};
use odt_styler_odf::OdfDocument;

const SPAN_X: &str = r#"{
    "modifications": [
        {"type": "regex_span_styler", "rules": [{"style_name": "Bold", "pattern": "x"}]}
    ]
}"#;

fn rules(reference: &std::path::Path) -> String {
    format!(
        r#"{{
            "modifications": [
                {{"type": "import_style", "rules": [
                    {{"style_name": "Bold", "family": "text", "source_file": "{}"}}
                ]}},
                {{"type": "regex_span_styler", "rules": [
                    {{"style_name": "Bold", "pattern": "URGENT: (.+)"}}
                ]}}
            ]
        }}"#,
        reference.display()
    )
}

#[test]
fn urgent_scenario_wraps_capture_and_reports_totals() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.odt");
    common::write(&reference, BOLD, "");
    let input = dir.path().join("memo.odt");
    common::write(&input, "", "<text:p>URGENT: Call back</text:p><text:p>FYI</text:p>");

    let specs = parse_rules(&rules(&reference)).unwrap();
    let processor = BatchProcessor::from_specs(&specs, BatchOptions::default()).unwrap();
    let report = processor.run(&[input.clone()]);

    let output = dir.path().join("memo_EDITED.odt");
    assert!(matches!(
        &report.files[..],
        [FileOutcome::Processed { output: written, .. }] if *written == output
    ));
    assert_eq!(
        report.totals.to_string(),
        "Import text style: Bold -> Success\nApplied 'Bold' -> 1"
    );

    let edited = OdfDocument::open(&output).unwrap();
    assert_eq!(
        all_spans(&edited),
        vec![("Bold".to_string(), "Call back".to_string())]
    );
    let original = OdfDocument::open(&input).unwrap();
    assert!(all_spans(&original).is_empty());
}

#[test]
fn counters_accumulate_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.odt");
    common::write(&reference, BOLD, "");
    for (name, body) in [
        ("a.odt", "<text:p>URGENT: one</text:p><text:p>URGENT: two</text:p>"),
        ("b.odt", "<text:p>URGENT: three</text:p>"),
        ("c.odt", "<text:p>nothing</text:p>"),
    ] {
        common::write(&dir.path().join(name), "", body);
    }

    let specs = parse_rules(&rules(&reference)).unwrap();
    let processor = BatchProcessor::from_specs(&specs, BatchOptions::default()).unwrap();
    let files = discover(&format!("{}/[abc].odt", dir.path().display())).unwrap();
    let report = processor.run(&files);

    assert_eq!(report.files.len(), 3);
    assert_eq!(
        report.totals.get("Applied 'Bold'"),
        Some(&Outcome::MatchCount(3))
    );
    assert_eq!(
        report.totals.get("Import text style: Bold"),
        Some(&Outcome::Success)
    );
}

#[test]
fn dry_run_writes_nothing_and_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![dir.path().join("a.odt"), dir.path().join("b.odt")];
    for file in &files {
        common::write(file, BOLD, "<text:p>URGENT: x</text:p>");
    }
    let specs = parse_rules(&rules(&dir.path().join("reference.odt"))).unwrap();
    let options = BatchOptions {
        dry_run: true,
        ..BatchOptions::default()
    };
    let processor = BatchProcessor::from_specs(&specs, options).unwrap();

    let mut announced = Vec::new();
    let report = processor.run_with(&files, |outcome| {
        announced.push(outcome.path().to_path_buf());
    });

    assert_eq!(announced, files);
    assert!(
        report
            .files
            .iter()
            .all(|file| matches!(file, FileOutcome::DryRun { .. }))
    );
    assert!(report.totals.is_empty());
    assert!(!dir.path().join("a_EDITED.odt").exists());
    assert!(!dir.path().join("b_EDITED.odt").exists());
}

#[test]
fn broken_file_is_reported_and_batch_continues() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("a.odt");
    std::fs::write(&broken, b"plain text").unwrap();
    let good = dir.path().join("b.odt");
    common::write(&good, BOLD, "<text:p>URGENT: x</text:p>");

    let specs = parse_rules(SPAN_X).unwrap();
    let options = BatchOptions {
        suffix: "-styled".to_string(),
        dry_run: false,
    };
    let report = BatchProcessor::from_specs(&specs, options)
        .unwrap()
        .run(&[broken.clone(), good]);

    assert!(report.has_failures());
    let failed: Vec<_> = report.failures().map(FileOutcome::path).collect();
    assert_eq!(failed, vec![broken.as_path()]);
    assert!(dir.path().join("b-styled.odt").exists());
    assert_eq!(
        report.totals.get("Applied 'Bold'"),
        Some(&Outcome::MatchCount(1))
    );
}

#[test]
fn missing_modifications_key_runs_an_empty_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.odt");
    common::write(&input, "", "<text:p>text</text:p>");

    let specs = parse_rules("{}").unwrap();
    let processor = BatchProcessor::from_specs(&specs, BatchOptions::default()).unwrap();
    let report = processor.run(&[input]);

    assert!(!report.has_failures());
    assert!(report.totals.is_empty());
    assert!(dir.path().join("plain_EDITED.odt").exists());
}

#[test]
fn oversized_space_run_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let wide = dir.path().join("a.odt");
    common::write(
        &wide,
        BOLD,
        r#"<text:p>x<text:s text:c="18446744073709551615"/>y</text:p>"#,
    );
    let good = dir.path().join("b.odt");
    common::write(&good, BOLD, "<text:p>x</text:p>");

    let specs = parse_rules(SPAN_X).unwrap();
    let report = BatchProcessor::from_specs(&specs, BatchOptions::default())
        .unwrap()
        .run(&[wide, good]);

    assert!(!report.has_failures());
    assert!(dir.path().join("a_EDITED.odt").exists());
    assert!(dir.path().join("b_EDITED.odt").exists());
    assert_eq!(
        report.totals.get("Applied 'Bold'"),
        Some(&Outcome::MatchCount(2))
    );
}

#[test]
fn empty_suffix_never_overwrites_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("memo.odt");
    common::write(&input, BOLD, "<text:p>x</text:p>");
    let options = BatchOptions {
        suffix: String::new(),
        dry_run: false,
    };

    let err = BatchProcessor::from_specs(&parse_rules(SPAN_X).unwrap(), options).unwrap_err();

    assert!(matches!(err, CoreError::EmptySuffix));
    let untouched = OdfDocument::open(&input).unwrap();
    assert!(all_spans(&untouched).is_empty());
}
