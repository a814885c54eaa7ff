//! Reads written containers back, for checking the container contract on real files.

use crate::error::ExportError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::package::MANIFEST_PATH;
use crate::package::MIMETYPE_PATH;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use zip::CompressionMethod;
use zip::ZipArchive;

/// XML element name for manifest entries
const FILE_ENTRY: QName = QName(b"manifest:file-entry");
/// XML element name for table row
const TABLE_ROW: QName = QName(b"table:table-row");
/// XML element name for table cell
const TABLE_CELL: QName = QName(b"table:table-cell");
/// XML element name for covered table cell (merged cells)
const TABLE_COVERED_CELL: QName = QName(b"table:covered-table-cell");
/// XML element name for paragraph text
const PARAGRAPH: QName = QName(b"text:p");
/// XML element name for drawing frames
const FRAME: QName = QName(b"draw:frame");

/// Error types specific to reading containers back
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Package part '{0}' is missing")]
    MissingPart(String),
}

/// One ZIP entry in archive order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySummary {
    pub name: String,
    /// True if the entry is stored uncompressed
    pub stored: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub full_path: String,
    pub media_type: String,
}

/// What a written container holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageSummary {
    pub entries: Vec<EntrySummary>,
    pub mimetype: String,
    pub manifest: Vec<ManifestEntry>,
}

impl PackageSummary {
    /// True if the first entry is an uncompressed `mimetype`.
    pub fn mimetype_first_and_stored(&self) -> bool {
        self.entries
            .first()
            .map(|entry| entry.name == MIMETYPE_PATH && entry.stored)
            .unwrap_or(false)
    }

    /// True if the manifest lists exactly the parts present in the archive. The
    /// package root `/`, the `mimetype` entry and the manifest itself are not parts.
    pub fn manifest_matches_entries(&self) -> bool {
        let listed = self
            .manifest
            .iter()
            .map(|entry| entry.full_path.as_str())
            .filter(|path| *path != "/")
            .collect::<BTreeSet<_>>();
        let present = self
            .entries
            .iter()
            .map(|entry| entry.name.as_str())
            .filter(|name| *name != MIMETYPE_PATH && *name != MANIFEST_PATH)
            .collect::<BTreeSet<_>>();
        let parts = self.manifest.iter().filter(|entry| entry.full_path != "/").count();
        listed.len() == parts && listed == present
    }

    /// Media type declared for the package root
    pub fn root_media_type(&self) -> Option<&str> {
        self.manifest
            .iter()
            .find(|entry| entry.full_path == "/")
            .map(|entry| entry.media_type.as_str())
    }
}

/// A table cell read back from `content.xml`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSummary {
    /// Paragraphs joined by `\n`; watermark frames are skipped
    pub text: String,
    pub spanned: u32,
    pub covered: bool,
}

/// A table row read back from `content.xml`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSummary {
    pub cells: Vec<CellSummary>,
}

impl RowSummary {
    /// Number of cell elements, covered fillers included.
    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

fn open(path: &Path) -> Result<ZipArchive<BufReader<File>>, ExportError> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// Lists the entries, the media type and the manifest of a written container.
pub fn inspect_package(path: &Path) -> Result<PackageSummary, ExportError> {
    let mut zip = open(path)?;

    let mut entries = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let file = zip.by_index(index)?;
        entries.push(EntrySummary {
            name: file.name().to_owned(),
            stored: file.compression() == CompressionMethod::Stored,
        });
    }

    let mut mimetype = String::new();
    zip.part(MIMETYPE_PATH)?
        .ok_or_else(|| PackageError::MissingPart(MIMETYPE_PATH.to_owned()))?
        .read_to_string(&mut mimetype)?;

    let mut manifest = Vec::new();
    let mut reader = zip
        .xml_reader(MANIFEST_PATH)?
        .ok_or_else(|| PackageError::MissingPart(MANIFEST_PATH.to_owned()))?;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == FILE_ENTRY => {
            let full_path = event.get_attribute_value("manifest:full-path")?.unwrap_or_default().into_owned();
            let media_type = event.get_attribute_value("manifest:media-type")?.unwrap_or_default().into_owned();
            manifest.push(ManifestEntry { full_path, media_type });
        }
    });

    Ok(PackageSummary {
        entries,
        mimetype,
        manifest,
    })
}

/// Reads the table rows of a written spreadsheet.
pub fn read_table_rows(path: &Path) -> Result<Vec<RowSummary>, ExportError> {
    let mut zip = open(path)?;
    let mut reader = zip
        .xml_reader("content.xml")?
        .ok_or_else(|| PackageError::MissingPart("content.xml".to_owned()))?;

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut text = String::new();
    let mut spanned = 1;
    let mut element_context = false;
    let mut frame_context = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TABLE_ROW => row = Vec::new(),
        Event::End(event) if event.name() == TABLE_ROW => rows.push(RowSummary { cells: std::mem::take(&mut row) }),
        Event::Start(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
            spanned = event.parse_attribute_value("table:number-columns-spanned")?.unwrap_or(1);
            text.clear();
            element_context = true;
        }
        Event::End(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
            row.push(CellSummary {
                text: std::mem::take(&mut text),
                spanned,
                covered: event.name() == TABLE_COVERED_CELL,
            });
            element_context = false;
        }
        Event::Start(event) if event.name() == FRAME => frame_context = true,
        Event::End(event) if event.name() == FRAME => frame_context = false,
        Event::Start(event) if element_context && !frame_context && event.name() == PARAGRAPH => {
            if !text.is_empty() {
                text.push('\n');
            }
        }
        Event::Text(event) if element_context && !frame_context => text.push_bytes_text(&event)?,
        Event::GeneralRef(event) if element_context && !frame_context => text.push_bytes_ref(&event)?,
    });
    Ok(rows)
}
