//! # Document builders
//!
//! Build the XML trees of the exported parts in memory. Nothing in here touches the
//! file system; the trees are handed to [`crate::package`] for serialization.

pub(crate) mod names;
pub mod ods;
pub mod odt;
pub mod styles;

pub use ods::build_spreadsheet;
pub use ods::Spreadsheet;
pub use odt::build_customer_document;
pub use styles::build_styles;
pub use styles::StyleBundle;
