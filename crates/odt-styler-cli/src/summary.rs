use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use odt_styler_core::{BatchReport, FileOutcome};
use odt_styler_model::{Outcome, Totals};

/// Console lines for one finished file.
pub fn file_lines(outcome: &FileOutcome) -> Vec<String> {
    let name = file_name(outcome);
    match outcome {
        FileOutcome::DryRun { .. } => vec![format!("[DRY RUN] Would process: {name}")],
        FileOutcome::Processed { logs, .. } | FileOutcome::Failed { logs, .. } => {
            std::iter::once(format!("Processing: {name}"))
                .chain(logs.iter().map(|log| format!("  {log}")))
                .collect()
        }
    }
}

pub fn print_file_outcome(outcome: &FileOutcome) {
    for line in file_lines(outcome) {
        println!("{line}");
    }
    if let FileOutcome::Failed { error, .. } = outcome {
        eprintln!("Error processing {}: {error}", file_name(outcome));
    }
}

/// Totals as a `MODIFICATION | RESULT` table.
pub fn summary_table(totals: &Totals) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("MODIFICATION"), header_cell("RESULT")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, outcome) in totals.iter() {
        table.add_row(vec![Cell::new(label), outcome_cell(outcome)]);
    }
    table
}

pub fn print_summary(report: &BatchReport) {
    println!();
    println!("{}", summary_table(&report.totals));
    if report.has_failures() {
        eprintln!("Failed files:");
        for failure in report.failures() {
            eprintln!("- {}", failure.path().display());
        }
    }
}

fn file_name(outcome: &FileOutcome) -> String {
    let path = outcome.path();
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn outcome_cell(outcome: &Outcome) -> Cell {
    match outcome {
        Outcome::MatchCount(0) => dim_cell(outcome),
        Outcome::MatchCount(_) | Outcome::Success => Cell::new(outcome)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Outcome::NotFound => Cell::new(outcome).fg(Color::Yellow),
        Outcome::Error(_) => Cell::new(outcome)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
