//! JSON rule file loading.
//!
//! The file groups rules by operation type:
//!
//! ```json
//! {
//!   "modifications": [
//!     {"type": "import_style", "rules": [
//!       {"style_name": "Bold", "family": "text", "source_file": "template.odt"}
//!     ]},
//!     {"type": "regex_span_styler", "rules": [
//!       {"style_name": "Bold", "pattern": "URGENT: (.+)"}
//!     ]}
//!   ]
//! }
//! ```
//!
//! Groups are flattened in file order into a list of [`ModificationSpec`]s.
//! Everything that can be checked without opening a document (empty names,
//! regex syntax) is checked here, so a bad rule never reaches the batch.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::family::Family;
use crate::spec::ModificationSpec;

/// Top-level shape of the rule file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub modifications: Vec<ModificationGroup>,
}

/// A group of rules sharing one operation type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModificationGroup {
    ImportStyle {
        #[serde(default)]
        rules: Vec<ImportStyleRule>,
    },
    RegexSpanStyler {
        #[serde(default)]
        rules: Vec<RegexSpanRule>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportStyleRule {
    pub style_name: String,
    #[serde(default)]
    pub family: Family,
    pub source_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegexSpanRule {
    pub style_name: String,
    pub pattern: String,
}

impl RuleFile {
    /// Flatten the groups into validated specs, preserving file order.
    pub fn into_specs(self) -> Result<Vec<ModificationSpec>> {
        let mut specs = Vec::new();
        for group in self.modifications {
            match group {
                ModificationGroup::ImportStyle { rules } => {
                    for rule in rules {
                        specs.push(ModificationSpec::ImportStyle {
                            style_name: rule.style_name,
                            family: rule.family,
                            source_file: rule.source_file,
                        });
                    }
                }
                ModificationGroup::RegexSpanStyler { rules } => {
                    for rule in rules {
                        specs.push(ModificationSpec::RegexSpan {
                            style_name: rule.style_name,
                            pattern: rule.pattern,
                        });
                    }
                }
            }
        }
        for (index, spec) in specs.iter().enumerate() {
            validate_spec(index, spec)?;
        }
        Ok(specs)
    }
}

/// Parse and validate rule file contents.
pub fn parse_rules(json: &str) -> Result<Vec<ModificationSpec>> {
    let file: RuleFile = serde_json::from_str(json)?;
    file.into_specs()
}

/// Read, parse and validate a rule file.
pub fn load_rules(path: &Path) -> Result<Vec<ModificationSpec>> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let specs = parse_rules(&json)?;
    debug!(path = %path.display(), rule_count = specs.len(), "loaded rule file");
    Ok(specs)
}

fn validate_spec(index: usize, spec: &ModificationSpec) -> Result<()> {
    if spec.style_name().trim().is_empty() {
        return Err(ConfigError::EmptyStyleName { index });
    }
    match spec {
        ModificationSpec::ImportStyle {
            style_name,
            source_file,
            ..
        } => {
            if source_file.as_os_str().is_empty() {
                return Err(ConfigError::EmptySourceFile {
                    index,
                    style_name: style_name.clone(),
                });
            }
        }
        ModificationSpec::RegexSpan {
            style_name,
            pattern,
        } => {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                index,
                style_name: style_name.clone(),
                source,
            })?;
        }
    }
    Ok(())
}
