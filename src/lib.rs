//! # Verteiler Export
//!
//! Hand-built OpenDocument export for distribution board labelling. Label lines such as
//! `3-6 Lüftung` are validated against the column grid of an installation and laid out
//! as an `.ods` label sheet; customer records are written as an `.odt` report.
//!
//! ## Features
//!
//! - **Label grid validation**: single columns (`5`), ranges (`3-6`) and plus-counts
//!   (`7+5`), with typed per-line diagnostics for format, range and overlap errors
//! - **ODS label sheets**: one label row and one content row per field/row unit,
//!   merged cells with covered fillers, optional watermark stamp
//! - **ODT customer reports**: headings and labelled paragraphs, empty fields omitted
//! - **Valid containers**: uncompressed `mimetype` first, manifest derived from the
//!   written parts, all-or-nothing file writes
//! - **Settings and records**: lenient JSON settings, typed records with a versioned
//!   schema migration
//!
//! ## Export Functions
//!
//! - [`export_installation_ods`]: label sheet of one installation
//! - [`export_customer_odt`]: report of one customer and its installations

pub mod document;
pub mod error;
pub mod export;
pub mod grid;
pub mod helpers;
pub mod package;
pub mod records;
pub mod settings;

/// Columns of one field/row unit
pub const COLUMNS_PER_UNIT: u32 = 12;

pub use error::ExportError;
pub use error::InputError;
pub use export::export_customer_odt;
pub use export::export_customer_odt_at;
pub use export::export_installation_ods;
pub use export::export_installation_ods_at;
pub use grid::validate;
pub use grid::GridShape;
pub use grid::Validation;
pub use records::Customer;
pub use records::Installation;
pub use records::RecordStore;
pub use settings::StyleSettings;
