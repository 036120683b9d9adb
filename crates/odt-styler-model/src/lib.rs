//! Rule, outcome and totals definitions shared by the ODF styler crates.

pub mod config;
pub mod error;
pub mod family;
pub mod outcome;
pub mod spec;
pub mod totals;

pub use config::{
    ImportStyleRule, ModificationGroup, RegexSpanRule, RuleFile, load_rules, parse_rules,
};
pub use error::{ConfigError, Result};
pub use family::Family;
pub use outcome::{ActionLog, Outcome};
pub use spec::ModificationSpec;
pub use totals::Totals;
