use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the document store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OdfError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: Box<OdfError>,
    },
    #[error("cannot save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: Box<OdfError>,
    },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid package: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("malformed {part}: {source}")]
    Xml { part: String, source: XmlError },
    #[error("not an OpenDocument package (mimetype: {mimetype})")]
    NotOdf { mimetype: String },
    #[error("package has no {part}")]
    MissingPart { part: String },
}

impl OdfError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: OdfError) -> Self {
        Self::Open {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn save(path: impl Into<PathBuf>, source: OdfError) -> Self {
        Self::Save {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn xml(part: &str, source: XmlError) -> Self {
        Self::Xml {
            part: part.to_string(),
            source,
        }
    }
}

/// XML syntax or serialization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    pub message: String,
    pub position: Option<u64>,
}

impl XmlError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
            position: None,
        }
    }

    pub fn at(message: impl fmt::Display, position: u64) -> Self {
        Self {
            message: message.to_string(),
            position: Some(position),
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} (byte {position})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for XmlError {}

pub type Result<T> = std::result::Result<T, OdfError>;
