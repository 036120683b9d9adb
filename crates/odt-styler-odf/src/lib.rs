//! A small OpenDocument text store.
//!
//! Covers what the styler needs and nothing more: open a package, look up and
//! insert named styles, walk body paragraphs, restyle paragraphs and spans,
//! and save the package back with untouched parts copied byte-for-byte.

pub mod document;
pub mod error;
pub mod package;
pub mod paragraph;
pub mod style;
pub mod xml;

pub use document::{CONTENT_XML, MANIFEST_XML, OdfDocument, STYLES_XML};
pub use error::{OdfError, Result, XmlError};
pub use package::{Compression, MIMETYPE, OdfPackage, PackageEntry};
pub use paragraph::Paragraph;
pub use style::Style;
pub use xml::{Element, Node, XmlDocument};
