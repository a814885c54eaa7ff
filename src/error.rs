use std::path::PathBuf;
use thiserror::Error;

/// Input problems the caller has to fix before an export can succeed.
/// None of these ever leaves a file behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Keine Anlage zum Exportieren vorhanden.")]
    MissingRecord,

    #[error("Die Anlage enthält {error_count} fehlerhafte Beschriftung(en). Bitte beheben Sie die Fehler vor dem Export.")]
    InvalidLabels { error_count: usize },

    #[error("Keine gültigen Beschriftungen zum Exportieren gefunden!")]
    NoValidLabels,
}

/// Main error type of the export crate.
/// Aggregates caller input errors, file system failures and errors from dependencies.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0}")]
    WithContextError(String),

    #[error("{0}")]
    InvalidInput(#[from] InputError),

    /// Writing the target file failed; no partial file is left behind.
    #[error("Export nach '{path}' fehlgeschlagen: {source}")]
    ExportFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Package module errors
    #[error("{0}")]
    PackageError(#[from] crate::package::inspect::PackageError),
}

impl ExportError {
    /// True for errors the user can resolve by editing the input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ExportError::InvalidInput(_))
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, ExportError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| match e {
            // Typed conditions stay matchable by the caller.
            ExportError::InvalidInput(_) | ExportError::ExportFailed { .. } => e,
            other => ExportError::WithContextError(format!("{}: {}", message, other)),
        })
    }
}
