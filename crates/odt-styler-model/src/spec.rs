use std::path::PathBuf;

use serde::Serialize;

use crate::family::Family;

/// One edit operation, as loaded from the rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModificationSpec {
    /// Copy a style definition from a reference document.
    ImportStyle {
        style_name: String,
        family: Family,
        source_file: PathBuf,
    },
    /// Apply an existing style to text matching `pattern`.
    RegexSpan { style_name: String, pattern: String },
}

impl ModificationSpec {
    pub fn style_name(&self) -> &str {
        match self {
            Self::ImportStyle { style_name, .. } | Self::RegexSpan { style_name, .. } => {
                style_name
            }
        }
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ImportStyle { .. } => "import_style",
            Self::RegexSpan { .. } => "regex_span_styler",
        }
    }
}
