//! Fixture documents for the modifier and batch tests.

#![allow(dead_code)]

use std::path::Path;

use odt_styler_odf::{CONTENT_XML, MANIFEST_XML, MIMETYPE, OdfDocument, OdfPackage, STYLES_XML};

const NAMESPACES: &str = concat!(
    r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
    r#"xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" "#,
    r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" "#,
    r#"xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" "#,
    r#"xmlns:fo="urn:oasis:names:xsl-formatting-objects:xmlns:xsl-fo-compatible:1.0""#,
);

pub const BOLD: &str = r#"<style:style style:name="Bold" style:family="text"><style:text-properties fo:font-weight="bold"/></style:style>"#;

pub const QUOTE: &str = r#"<style:style style:name="Quotations" style:display-name="Quote" style:family="paragraph"><style:paragraph-properties fo:margin-left="1cm"/></style:style>"#;

pub const NUMBERING: &str = r#"<text:list-style style:name="Numbering"/>"#;

/// A text document package with `styles` in `office:styles` and `body` in
/// `office:text`.
pub fn package(styles: &str, body: &str) -> OdfPackage {
    OdfPackage::new()
        .with_entry(MIMETYPE, "application/vnd.oasis.opendocument.text")
        .with_entry(
            CONTENT_XML,
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content {NAMESPACES}><office:automatic-styles/><office:body><office:text>{body}</office:text></office:body></office:document-content>"#
            ),
        )
        .with_entry(
            STYLES_XML,
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><office:document-styles {NAMESPACES}><office:styles>{styles}</office:styles></office:document-styles>"#
            ),
        )
        .with_entry(
            MANIFEST_XML,
            r#"<?xml version="1.0" encoding="UTF-8"?><manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0"><manifest:file-entry manifest:full-path="/" manifest:media-type="application/vnd.oasis.opendocument.text"/></manifest:manifest>"#,
        )
}

pub fn document(styles: &str, body: &str) -> OdfDocument {
    OdfDocument::from_package(package(styles, body)).unwrap()
}

pub fn write(path: &Path, styles: &str, body: &str) {
    package(styles, body).write_to(path).unwrap();
}

/// `(style, text)` of every span in every body paragraph.
pub fn all_spans(document: &OdfDocument) -> Vec<(String, String)> {
    document
        .paragraphs()
        .into_iter()
        .flat_map(odt_styler_odf::paragraph::spans)
        .collect()
}

/// `text:style-name` of every body paragraph.
pub fn paragraph_styles(document: &OdfDocument) -> Vec<Option<String>> {
    document
        .paragraphs()
        .into_iter()
        .map(|paragraph| paragraph.attribute("text:style-name").map(str::to_string))
        .collect()
}

/// Names in the common style table, in document order.
pub fn common_styles(document: &OdfDocument) -> Vec<String> {
    document
        .styles()
        .and_then(|styles| styles.root.child("office:styles"))
        .map(|table| {
            table
                .child_elements()
                .map(|style| style.attribute("style:name").unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
