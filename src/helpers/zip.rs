//! Part access inside written OpenDocument containers.

use crate::error::ExportError;
use crate::helpers::xml::XmlReader;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use zip::read::ZipFile;
use zip::ZipArchive;

pub(crate) trait ZipHelper<RS: Read + Seek> {
    /// Opens the part stored under exactly `name`. Part names are case-sensitive.
    fn part(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, ExportError>;

    /// Opens a part for event-based XML reading.
    fn xml_reader(&'_ mut self, name: &str) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, ExportError>;
}

impl<RS: Read + Seek> ZipHelper<RS> for ZipArchive<RS> {
    fn part(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, ExportError> {
        match self.index_for_name(name) {
            Some(index) => Ok(Some(self.by_index(index)?)),
            None => Ok(None),
        }
    }

    fn xml_reader(&'_ mut self, name: &str) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, ExportError> {
        Ok(self.part(name)?.map(|file| XmlReader::new(BufReader::new(file))))
    }
}
