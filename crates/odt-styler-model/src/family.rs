use std::fmt;

use serde::{Deserialize, Serialize};

/// ODF style family targeted by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Applies to a whole paragraph.
    #[default]
    Paragraph,
    /// Applies to a run of characters inside a paragraph.
    Text,
}

impl Family {
    /// Value of the `style:family` attribute for this family.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
