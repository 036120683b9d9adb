//! Batch-wide accumulation of modifier outcomes.

use std::fmt;

use tracing::warn;

use crate::outcome::{ActionLog, Outcome};

/// Accumulated outcome per label, in first-seen order.
///
/// Counters sum across files. Statuses are last-write-wins. [`Totals::merge`]
/// applies the same rule to a whole accumulator, which makes it an
/// associative reduction as long as each label keeps one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    entries: Vec<(String, Outcome)>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the accumulator.
    pub fn record(&mut self, label: &str, outcome: &Outcome) {
        match self.entries.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, current)) => *current = combine(label, current, outcome),
            None => self.entries.push((label.to_string(), outcome.clone())),
        }
    }

    pub fn record_logs<'a>(&mut self, logs: impl IntoIterator<Item = &'a ActionLog>) {
        for log in logs {
            self.record(&log.label, &log.outcome);
        }
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &Totals) {
        for (label, outcome) in &other.entries {
            self.record(label, outcome);
        }
    }

    pub fn get(&self, label: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, outcome)| outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries
            .iter()
            .map(|(label, outcome)| (label.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn combine(label: &str, current: &Outcome, incoming: &Outcome) -> Outcome {
    match (current, incoming) {
        (Outcome::MatchCount(left), Outcome::MatchCount(right)) => {
            Outcome::MatchCount(left.saturating_add(*right))
        }
        _ => {
            if current.is_counter() != incoming.is_counter() {
                warn!(label, %current, %incoming, "outcome kind changed for label");
            }
            incoming.clone()
        }
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (label, outcome)) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{label} -> {outcome}")?;
        }
        Ok(())
    }
}
