//! # Label Grid
//!
//! Parsing of label lines and their validation against the column grid of an
//! installation. Each field/row unit of the grid is [`crate::COLUMNS_PER_UNIT`] columns
//! wide; columns are numbered continuously across units starting at 1.

pub mod parser;
pub mod validator;

pub use parser::parse_columns;
pub use parser::parse_line;
pub use parser::ColumnRange;
pub use parser::LabelEntry;
pub use validator::validate;
pub use validator::GridShape;
pub use validator::LineError;
pub use validator::LineErrorKind;
pub use validator::ValidPlacement;
pub use validator::Validation;
