//! ODF zip container I/O.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::error::Result;

/// Name of the package entry holding the media type.
pub const MIMETYPE: &str = "mimetype";

/// Compression used when writing an entry back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Self::Stored => CompressionMethod::Stored,
            Self::Deflated => CompressionMethod::Deflated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub data: Vec<u8>,
    pub compression: Compression,
}

/// The raw entries of an ODF package, in archive order.
#[derive(Debug, Clone, Default)]
pub struct OdfPackage {
    entries: Vec<PackageEntry>,
}

impl OdfPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let compression = match file.compression() {
                CompressionMethod::Stored => Compression::Stored,
                _ => Compression::Deflated,
            };
            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            entries.push(PackageEntry {
                name,
                data,
                compression,
            });
        }
        debug!(entry_count = entries.len(), "read package");
        Ok(Self { entries })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write(file)
    }

    /// Write the archive. `mimetype` always goes first and uncompressed, as
    /// ODF consumers sniff it at a fixed offset.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let ordered = self
            .entries
            .iter()
            .filter(|entry| entry.name == MIMETYPE)
            .chain(self.entries.iter().filter(|entry| entry.name != MIMETYPE));
        for entry in ordered {
            let compression = if entry.name == MIMETYPE {
                Compression::Stored
            } else {
                entry.compression
            };
            let options =
                SimpleFileOptions::default().compression_method(compression.method());
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&entry.data)?;
        }
        zip.finish()?;
        Ok(())
    }

    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Replace an entry's data in place, or append a new deflated entry.
    pub fn set_entry(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.data = data,
            None => self.entries.push(PackageEntry {
                name: name.to_string(),
                data,
                compression: Compression::default(),
            }),
        }
    }

    #[must_use]
    pub fn with_entry(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.set_entry(name, data.into());
        self
    }

    /// Declared media type, if the package has a readable `mimetype` entry.
    pub fn mimetype(&self) -> Option<&str> {
        self.entry(MIMETYPE)
            .and_then(|entry| std::str::from_utf8(&entry.data).ok())
            .map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn mimetype_is_written_first_and_stored() {
        let package = OdfPackage::new()
            .with_entry("content.xml", "<office:document-content/>")
            .with_entry(MIMETYPE, "application/vnd.oasis.opendocument.text");

        let mut buffer = Cursor::new(Vec::new());
        package.write(&mut buffer).unwrap();
        buffer.set_position(0);

        let mut archive = zip::ZipArchive::new(&mut buffer).unwrap();
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), MIMETYPE);
        assert_eq!(first.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn entries_round_trip_in_order() {
        let package = OdfPackage::new()
            .with_entry(MIMETYPE, "application/vnd.oasis.opendocument.text")
            .with_entry("content.xml", "<a/>")
            .with_entry("Pictures/logo.png", vec![0u8, 1, 2, 3]);

        let mut buffer = Cursor::new(Vec::new());
        package.write(&mut buffer).unwrap();
        buffer.set_position(0);
        let reread = OdfPackage::from_reader(buffer).unwrap();

        let names: Vec<&str> = reread
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec![MIMETYPE, "content.xml", "Pictures/logo.png"]);
        assert_eq!(
            reread.entry("Pictures/logo.png").unwrap().data,
            vec![0u8, 1, 2, 3]
        );
        assert_eq!(
            reread.mimetype(),
            Some("application/vnd.oasis.opendocument.text")
        );
    }

    #[test]
    fn non_zip_input_is_an_archive_error() {
        let err = OdfPackage::from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, crate::OdfError::Archive(_)));
    }
}
