//! # Container writer
//!
//! Serializes document parts into an OpenDocument ZIP container:
//! - `mimetype` is the first entry and stored uncompressed
//! - every other entry is deflated
//! - `META-INF/manifest.xml` is generated from the parts actually added
//!
//! Files are written all-or-nothing: the archive is assembled in memory, written to a
//! temporary file next to the target and renamed into place.

pub mod inspect;

use crate::document::names::*;
use crate::error::ExportError;
use crate::helpers::xml::to_xml_bytes;
use crate::helpers::xml::Element;
use chrono::NaiveDateTime;
use std::fs;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Name of the uncompressed media type entry
pub const MIMETYPE_PATH: &str = "mimetype";
/// Path of the manifest inside the archive
pub const MANIFEST_PATH: &str = "META-INF/manifest.xml";
/// Media type of the XML parts
pub const XML_MEDIA_TYPE: &str = "text/xml";
/// Value of `meta:generator`
pub const GENERATOR: &str = concat!("Verteiler-Beschriften/", env!("CARGO_PKG_VERSION"));

/// Kind of OpenDocument container
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Spreadsheet,
    Text,
}

impl DocumentKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => "application/vnd.oasis.opendocument.spreadsheet",
            DocumentKind::Text => "application/vnd.oasis.opendocument.text",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => "ods",
            DocumentKind::Text => "odt",
        }
    }
}

/// One serialized XML part of the package
#[derive(Clone, Debug)]
pub struct Part {
    pub path: &'static str,
    pub media_type: &'static str,
    pub data: Vec<u8>,
}

/// The parts of one document, in the order they are written.
#[derive(Clone, Debug)]
pub struct Package {
    kind: DocumentKind,
    parts: Vec<Part>,
}

impl Package {
    pub fn new(kind: DocumentKind) -> Self {
        Package {
            kind,
            parts: Vec::new(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Serializes `root` and adds it as an XML part.
    pub fn add_xml(&mut self, path: &'static str, root: &Element) -> Result<(), ExportError> {
        let data = to_xml_bytes(root)?;
        self.parts.retain(|part| part.path != path);
        self.parts.push(Part {
            path,
            media_type: XML_MEDIA_TYPE,
            data,
        });
        Ok(())
    }

    /// Root of `META-INF/manifest.xml`: the package root plus one entry per added part.
    pub fn manifest(&self) -> Element {
        let entry = |path: &str, media_type: &str| {
            Element::new(MANIFEST_FILE_ENTRY)
                .attr(MANIFEST_FULL_PATH, path)
                .attr(MANIFEST_MEDIA_TYPE, media_type)
        };
        let mut manifest = Element::new(MANIFEST_MANIFEST)
            .attr(MANIFEST_VERSION, ODF_VERSION)
            .child(entry("/", self.kind.mime_type()));
        for part in &self.parts {
            manifest.push(entry(part.path, part.media_type));
        }
        manifest
    }

    /// Builds the complete ZIP archive in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::with_capacity(16 * 1024)));

        zip.start_file(MIMETYPE_PATH, stored)?;
        zip.write_all(self.kind.mime_type().as_bytes())?;

        zip.start_file(MANIFEST_PATH, deflated)?;
        zip.write_all(&to_xml_bytes(&self.manifest())?)?;

        for part in &self.parts {
            zip.start_file(part.path, deflated)?;
            zip.write_all(&part.data)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Writes the archive to `path`, creating missing directories. On failure no
    /// file is left at `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = self.to_bytes()?;
        let failed = |source| ExportError::ExportFailed {
            path: path.to_owned(),
            source,
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory).map_err(failed)?;

        let mut file = NamedTempFile::new_in(directory).map_err(failed)?;
        if let Err(error) = file.write_all(&bytes).and_then(|_| file.as_file().sync_all()) {
            warn!(path = %path.display(), %error, "discarding incomplete archive");
            return Err(failed(error));
        }
        file.persist(path).map_err(|error| {
            warn!(path = %path.display(), error = %error.error, "discarding incomplete archive");
            failed(error.error)
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "archive written");
        Ok(())
    }
}

/// Root of `meta.xml`.
pub fn meta_document(created: NaiveDateTime) -> Element {
    Element::new(OFFICE_DOCUMENT_META)
        .attr(OFFICE_VERSION, ODF_VERSION)
        .child(
            Element::new(OFFICE_META)
                .child(Element::new(META_GENERATOR).text(GENERATOR))
                .child(Element::new(META_CREATION_DATE).text(created.format("%Y-%m-%dT%H:%M:%S").to_string())),
        )
}
