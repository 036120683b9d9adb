//! Document modifiers.
//!
//! A modifier edits one open document in place and reports what it did as
//! labelled outcomes. It never saves and never fails: document store errors
//! become [`Outcome::Error`] entries so the rest of the pipeline still runs.

use std::borrow::Cow;
use std::path::PathBuf;

use odt_styler_model::{ActionLog, Family, ModificationSpec, Outcome};
use odt_styler_odf::{OdfDocument, Style};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone)]
pub enum Modifier {
    StyleImport(StyleImport),
    RegexSpan(RegexSpan),
}

impl Modifier {
    /// Build a modifier from a loaded rule, compiling its pattern.
    pub fn from_spec(spec: &ModificationSpec) -> Result<Self> {
        match spec {
            ModificationSpec::ImportStyle {
                style_name,
                family,
                source_file,
            } => Ok(Self::StyleImport(StyleImport::new(
                *family,
                style_name,
                source_file,
            ))),
            ModificationSpec::RegexSpan {
                style_name,
                pattern,
            } => RegexSpan::new(style_name, pattern).map(Self::RegexSpan),
        }
    }

    pub fn from_specs(specs: &[ModificationSpec]) -> Result<Vec<Self>> {
        specs
            .iter()
            .map(|spec| {
                debug!(kind = spec.kind(), style = spec.style_name(), "building modifier");
                Self::from_spec(spec)
            })
            .collect()
    }

    pub fn apply(&self, document: &mut OdfDocument) -> Vec<ActionLog> {
        let log = match self {
            Self::StyleImport(modifier) => modifier.apply(document),
            Self::RegexSpan(modifier) => modifier.apply(document),
        };
        vec![log]
    }
}

/// Copy a named style from a reference document into the target.
#[derive(Debug, Clone)]
pub struct StyleImport {
    family: Family,
    style_name: String,
    source_file: PathBuf,
}

impl StyleImport {
    pub fn new(
        family: Family,
        style_name: impl Into<String>,
        source_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            family,
            style_name: style_name.into(),
            source_file: source_file.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("Import {} style: {}", self.family, self.style_name)
    }

    pub fn apply(&self, document: &mut OdfDocument) -> ActionLog {
        ActionLog::new(self.label(), self.import_into(document))
    }

    fn import_into(&self, document: &mut OdfDocument) -> Outcome {
        // The source is reopened per target so a failure stays local to one file.
        let source = match OdfDocument::open(&self.source_file) {
            Ok(source) => source,
            Err(error) => {
                warn!(style = %self.style_name, %error, "cannot open style source");
                return Outcome::error(error);
            }
        };
        let Some(style) = source
            .get_style(self.family, &self.style_name)
            .filter(Style::is_style)
        else {
            debug!(style = %self.style_name, family = %self.family, "style not in source");
            return Outcome::NotFound;
        };
        match document.insert_style(&style) {
            Ok(()) => Outcome::Success,
            Err(error) => {
                warn!(style = %self.style_name, %error, "cannot insert style");
                Outcome::error(error)
            }
        }
    }
}

/// Apply an existing style to text matching a pattern.
///
/// With a text style of that name, matches become spans; without one, the
/// whole paragraph takes the style instead. A paragraph style found by its
/// display name is applied under its internal `style:name`.
#[derive(Debug, Clone)]
pub struct RegexSpan {
    style_name: String,
    regex: Regex,
}

impl RegexSpan {
    pub fn new(style_name: impl Into<String>, pattern: &str) -> Result<Self> {
        let style_name = style_name.into();
        let regex = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
            style_name: style_name.clone(),
            source,
        })?;
        Ok(Self { style_name, regex })
    }

    pub fn label(&self) -> String {
        format!("Applied '{}'", self.style_name)
    }

    pub fn apply(&self, document: &mut OdfDocument) -> ActionLog {
        let text_style = document
            .get_style(Family::Text, &self.style_name)
            .filter(Style::is_style)
            .map(|style| style.name().to_string());
        let paragraph_style = document
            .get_style(Family::Paragraph, &self.style_name)
            .filter(Style::is_style)
            .map_or_else(|| self.style_name.clone(), |style| style.name().to_string());

        let mut count = 0u64;
        let matched = document.for_each_matching_paragraph_mut(&self.regex, |paragraph| {
            paragraph.strip_spans();
            match &text_style {
                Some(style) => {
                    let target = self.span_pattern(&paragraph.recursive_text());
                    count += paragraph.wrap_matches(&target, style) as u64;
                }
                None => {
                    paragraph.set_style(&paragraph_style);
                    count += 1;
                }
            }
        });
        debug!(
            style = %self.style_name,
            paragraphs = matched,
            count,
            inline = text_style.is_some(),
            "applied regex style"
        );
        ActionLog::new(self.label(), Outcome::MatchCount(count))
    }

    /// What to wrap inside one paragraph: the literal text of capture group 1
    /// when it took part in the match, otherwise the pattern itself.
    fn span_pattern(&self, text: &str) -> Cow<'_, Regex> {
        let group = self
            .regex
            .captures(text)
            .and_then(|captures| captures.get(1))
            .filter(|group| !group.is_empty());
        match group.and_then(|group| Regex::new(&regex::escape(group.as_str())).ok()) {
            Some(literal) => Cow::Owned(literal),
            None => Cow::Borrowed(&self.regex),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_console_format() {
        let import = StyleImport::new(Family::Text, "Bold", "ref.odt");
        assert_eq!(import.label(), "Import text style: Bold");
        let span = RegexSpan::new("Quote", "^>").unwrap();
        assert_eq!(span.label(), "Applied 'Quote'");
    }

    #[test]
    fn capture_group_is_used_literally() {
        let span = RegexSpan::new("Bold", r"Price: (\$5\.00)").unwrap();
        let target = span.span_pattern("Price: $5.00 today");
        assert_eq!(target.as_str(), r"\$5\.00");
    }

    #[test]
    fn missing_or_empty_group_falls_back_to_pattern() {
        let span = RegexSpan::new("Bold", "URGENT").unwrap();
        assert_eq!(span.span_pattern("URGENT now").as_str(), "URGENT");

        let optional = RegexSpan::new("Bold", "a(x?)b").unwrap();
        assert_eq!(optional.span_pattern("ab").as_str(), "a(x?)b");

        let unmatched = RegexSpan::new("Bold", "a|(b)").unwrap();
        assert_eq!(unmatched.span_pattern("a").as_str(), "a|(b)");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let spec = ModificationSpec::RegexSpan {
            style_name: "Bold".to_string(),
            pattern: "(".to_string(),
        };
        let err = Modifier::from_spec(&spec).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPattern { .. }));
        assert!(err.to_string().contains("Bold"));
    }
}
