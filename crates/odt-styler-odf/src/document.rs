//! In-memory handle on one ODF text document.

use std::path::{Path, PathBuf};

use odt_styler_model::Family;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::{OdfError, Result};
use crate::package::OdfPackage;
use crate::paragraph::{PARAGRAPH, Paragraph, recursive_text};
use crate::style::{STYLE_FAMILY, STYLE_NAME, Style, find_style};
use crate::xml::{Element, Node, XmlDocument};

pub const CONTENT_XML: &str = "content.xml";
pub const STYLES_XML: &str = "styles.xml";
pub const MANIFEST_XML: &str = "META-INF/manifest.xml";

const ODF_MIMETYPE_PREFIX: &str = "application/vnd.oasis.opendocument";
const OFFICE_BODY: &str = "office:body";
const OFFICE_TEXT: &str = "office:text";
const OFFICE_STYLES: &str = "office:styles";
const AUTOMATIC_STYLES: &str = "office:automatic-styles";

const EMPTY_STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<office:document-styles"#,
    r#" xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0""#,
    r#" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0""#,
    r#" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0""#,
    r#" xmlns:fo="urn:oasis:names:xsl-formatting-objects:xmlns:xsl-fo-compatible:1.0""#,
    r#" office:version="1.3"><office:styles/></office:document-styles>"#,
);

/// An opened ODF package with its content and style parts parsed.
///
/// Only `content.xml` and `styles.xml` are re-serialized on save; every other
/// entry is written back unchanged.
#[derive(Debug, Clone)]
pub struct OdfDocument {
    path: Option<PathBuf>,
    package: OdfPackage,
    content: XmlDocument,
    styles: Option<XmlDocument>,
}

impl OdfDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let load = || -> Result<Self> {
            let package = OdfPackage::read(path)?;
            Self::from_package(package)
        };
        let mut document = load().map_err(|err| OdfError::open(path, err))?;
        document.path = Some(path.to_path_buf());
        debug!(path = %path.display(), "opened document");
        Ok(document)
    }

    pub fn from_package(package: OdfPackage) -> Result<Self> {
        match package.mimetype() {
            Some(mimetype) if mimetype.starts_with(ODF_MIMETYPE_PREFIX) => {}
            other => {
                return Err(OdfError::NotOdf {
                    mimetype: other.unwrap_or("<missing>").to_string(),
                });
            }
        }
        let content = parse_part(&package, CONTENT_XML)?.ok_or_else(|| OdfError::MissingPart {
            part: CONTENT_XML.to_string(),
        })?;
        let styles = parse_part(&package, STYLES_XML)?;
        Ok(Self {
            path: None,
            package,
            content,
            styles,
        })
    }

    /// Path the document was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &XmlDocument {
        &self.content
    }

    pub fn styles(&self) -> Option<&XmlDocument> {
        self.styles.as_ref()
    }

    /// Look up a named style by family.
    ///
    /// Searches content automatic styles, then common styles, then styles.xml
    /// automatic styles. See [`Style`] for what "lax" means here.
    pub fn get_style(&self, family: Family, name: &str) -> Option<Style<'_>> {
        let mut containers: Vec<(&Element, &Element)> = Vec::new();
        if let Some(automatic) = self.content.root.child(AUTOMATIC_STYLES) {
            containers.push((automatic, &self.content.root));
        }
        if let Some(styles) = &self.styles {
            for container in [OFFICE_STYLES, AUTOMATIC_STYLES] {
                if let Some(element) = styles.root.child(container) {
                    containers.push((element, &styles.root));
                }
            }
        }
        find_style(&containers, family, name)
    }

    /// Insert a copy of `style` into the common style table, replacing any
    /// style with the same name and family.
    pub fn insert_style(&mut self, style: &Style<'_>) -> Result<()> {
        let name = style.name();
        let family = style.family();
        let copy = style.element().clone();
        let namespaces: Vec<(String, String)> = style
            .namespace_declarations()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let styles = self.styles_part()?;
        for (key, value) in namespaces {
            if styles.root.attribute(&key).is_none() {
                styles.root.set_attribute(key, value);
            }
        }

        let table = styles.root.child_or_insert(OFFICE_STYLES);
        let same = |node: &Node| match node {
            Node::Element(element) => {
                element.attribute(STYLE_NAME) == Some(name)
                    && element.attribute(STYLE_FAMILY) == family
            }
            Node::Text(_) => false,
        };
        match table.children.iter().position(same) {
            Some(index) => {
                table.children[index] = Node::Element(copy);
                let mut position = 0;
                table.children.retain(|node| {
                    let keep = position <= index || !same(node);
                    position += 1;
                    keep
                });
            }
            None => table.children.push(Node::Element(copy)),
        }
        trace!(style = name, "inserted style");
        Ok(())
    }

    /// Visit every `text:p` in the document body, in document order,
    /// including paragraphs nested in tables, frames and notes.
    pub fn for_each_paragraph_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Paragraph<'_>),
    {
        if let Some(text) = self.body_mut() {
            visit_paragraphs(text, &mut visit);
        }
    }

    /// Visit paragraphs whose recursive text matches `pattern`. Returns the
    /// number of paragraphs visited.
    pub fn for_each_matching_paragraph_mut<F>(&mut self, pattern: &Regex, mut visit: F) -> usize
    where
        F: FnMut(&mut Paragraph<'_>),
    {
        let mut matched = 0;
        self.for_each_paragraph_mut(|paragraph| {
            if pattern.is_match(&paragraph.recursive_text()) {
                matched += 1;
                visit(paragraph);
            }
        });
        matched
    }

    /// Body paragraphs in document order.
    pub fn paragraphs(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        if let Some(text) = self
            .content
            .root
            .child(OFFICE_BODY)
            .and_then(|body| body.child(OFFICE_TEXT))
        {
            collect_paragraphs(text, &mut out);
        }
        out
    }

    /// Recursive text of each body paragraph.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs()
            .into_iter()
            .map(recursive_text)
            .collect()
    }

    /// Serialize the parsed parts back into a package.
    pub fn to_package(&self) -> Result<OdfPackage> {
        let mut package = self.package.clone();
        let content = self
            .content
            .to_bytes()
            .map_err(|err| OdfError::xml(CONTENT_XML, err))?;
        package.set_entry(CONTENT_XML, content);
        if let Some(styles) = &self.styles {
            let bytes = styles
                .to_bytes()
                .map_err(|err| OdfError::xml(STYLES_XML, err))?;
            package.set_entry(STYLES_XML, bytes);
        }
        Ok(package)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.to_package()
            .and_then(|package| package.write_to(path))
            .map_err(|err| OdfError::save(path, err))?;
        debug!(path = %path.display(), "saved document");
        Ok(())
    }

    fn body_mut(&mut self) -> Option<&mut Element> {
        self.content
            .root
            .child_mut(OFFICE_BODY)
            .and_then(|body| body.child_mut(OFFICE_TEXT))
    }

    /// The parsed styles part, created (and registered in the manifest) when
    /// the package has none.
    fn styles_part(&mut self) -> Result<&mut XmlDocument> {
        if self.styles.is_none() {
            let styles = XmlDocument::parse(EMPTY_STYLES_XML)
                .map_err(|err| OdfError::xml(STYLES_XML, err))?;
            self.register_in_manifest(STYLES_XML)?;
            self.styles = Some(styles);
        }
        self.styles.as_mut().ok_or_else(|| OdfError::MissingPart {
            part: STYLES_XML.to_string(),
        })
    }

    fn register_in_manifest(&mut self, part: &str) -> Result<()> {
        let Some(mut manifest) = parse_part(&self.package, MANIFEST_XML)? else {
            return Ok(());
        };
        let listed = manifest
            .root
            .child_elements()
            .any(|entry| entry.attribute("manifest:full-path") == Some(part));
        if !listed {
            manifest.root.children.push(Node::Element(
                Element::new("manifest:file-entry")
                    .with_attribute("manifest:full-path", part)
                    .with_attribute("manifest:media-type", "text/xml"),
            ));
            let bytes = manifest
                .to_bytes()
                .map_err(|err| OdfError::xml(MANIFEST_XML, err))?;
            self.package.set_entry(MANIFEST_XML, bytes);
        }
        Ok(())
    }
}

fn parse_part(package: &OdfPackage, part: &str) -> Result<Option<XmlDocument>> {
    let Some(entry) = package.entry(part) else {
        return Ok(None);
    };
    let xml = std::str::from_utf8(&entry.data)
        .map_err(|err| OdfError::xml(part, crate::error::XmlError::new(err)))?;
    XmlDocument::parse(xml)
        .map(Some)
        .map_err(|err| OdfError::xml(part, err))
}

fn visit_paragraphs<F>(element: &mut Element, visit: &mut F)
where
    F: FnMut(&mut Paragraph<'_>),
{
    for child in &mut element.children {
        if let Node::Element(child) = child {
            if child.name == PARAGRAPH {
                visit(&mut Paragraph::new(child));
            }
            visit_paragraphs(child, visit);
        }
    }
}

fn collect_paragraphs<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.name == PARAGRAPH {
            out.push(child);
        }
        collect_paragraphs(child, out);
    }
}
