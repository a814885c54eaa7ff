//! Label line parsing.
//!
//! A label line starts with a column spec followed by a free-text description:
//!
//! - `"1 Heizung"`: column 1
//! - `"3-6 Lüftung"`: columns 3 to 6
//! - `"7+5 Elektrik"`: column 7 plus five more, i.e. 7 to 12

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9+\-]+)[\s;]*(.*)$").expect("Hardcode regex pattern"));

/// Errors related to column spec parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Invalid column spec '{0}'")]
    FormatError(String),

    #[error("Reversed column range '{0}'")]
    ReversedRange(String),
}

/// One parsed, non-blank label line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelEntry {
    /// Raw column spec, e.g. `3-6`.
    pub column_spec: String,
    pub description: String,
}

/// Contiguous, inclusive range of 1-based column numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRange {
    first: u32,
    last: u32,
}

impl ColumnRange {
    /// Creates `first..=last`; `None` if the range would be reversed.
    pub fn new(first: u32, last: u32) -> Option<Self> {
        (first <= last).then_some(ColumnRange { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of columns covered.
    pub fn span(&self) -> u32 {
        self.last - self.first + 1
    }

    pub fn columns(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.columns().collect()
    }
}

impl fmt::Display for ColumnRange {
    /// `N` for a single column, `A-B` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

impl TryFrom<&str> for ColumnRange {
    type Error = ColumnError;

    /// Parses `N`, `A-B` or `A+K`. A `+` takes precedence over `-`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let format_error = || ColumnError::FormatError(value.to_owned());
        let number = |text: &str| -> Result<u32, ColumnError> {
            if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(format_error());
            }
            text.parse::<u32>().map_err(|_| format_error())
        };

        if let Some((start, count)) = value.split_once('+') {
            let start = number(start)?;
            let last = start.checked_add(number(count)?).ok_or_else(format_error)?;
            Ok(ColumnRange { first: start, last })
        } else if let Some((start, end)) = value.split_once('-') {
            let (start, end) = (number(start)?, number(end)?);
            ColumnRange::new(start, end).ok_or_else(|| ColumnError::ReversedRange(value.to_owned()))
        } else {
            let column = number(value)?;
            Ok(ColumnRange { first: column, last: column })
        }
    }
}

/// Parses one input line into a [`LabelEntry`].
///
/// Blank lines and lines without a leading column spec yield `None`; the validator
/// tells the two apart by checking for blank input first.
pub fn parse_line(line: &str) -> Option<LabelEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let captures = LINE_PATTERN.captures(line)?;
    let column_spec = captures.get(1)?.as_str().trim();
    if column_spec.is_empty() {
        return None;
    }
    Some(LabelEntry {
        column_spec: column_spec.to_owned(),
        description: captures.get(2).map(|matcher| matcher.as_str().trim()).unwrap_or_default().to_owned(),
    })
}

/// Converts a column spec to its range, `None` for malformed or reversed specs.
pub fn parse_columns(spec: &str) -> Option<ColumnRange> {
    ColumnRange::try_from(spec).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(spec: &str, description: &str) -> Option<LabelEntry> {
        Some(LabelEntry {
            column_spec: spec.to_owned(),
            description: description.to_owned(),
        })
    }

    #[test]
    fn parse_line_formats() {
        assert_eq!(parse_line("1 Heizung"), entry("1", "Heizung"));
        assert_eq!(parse_line("  3-6\tLüftung  "), entry("3-6", "Lüftung"));
        assert_eq!(parse_line("7+5;Elektrik"), entry("7+5", "Elektrik"));
        assert_eq!(parse_line("7+5 ; ; Elektrik Haus 2"), entry("7+5", "Elektrik Haus 2"));
        assert_eq!(parse_line("12"), entry("12", ""));
        assert_eq!(parse_line("4Licht"), entry("4", "Licht"));
    }

    #[test]
    fn parse_line_rejects_missing_spec() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t "), None);
        assert_eq!(parse_line("Heizung 1"), None);
        assert_eq!(parse_line("; 1 Heizung"), None);
    }

    #[test]
    fn parse_columns_grammars() {
        assert_eq!(parse_columns("5").map(|range| range.to_vec()), Some(vec![5]));
        assert_eq!(parse_columns("3-6").map(|range| range.to_vec()), Some(vec![3, 4, 5, 6]));
        assert_eq!(parse_columns("4-4").map(|range| range.to_vec()), Some(vec![4]));
        assert_eq!(parse_columns("7+5").map(|range| range.to_vec()), Some(vec![7, 8, 9, 10, 11, 12]));
        assert_eq!(parse_columns("7+0").map(|range| range.to_vec()), Some(vec![7]));
    }

    #[test]
    fn parse_columns_failures() {
        assert_eq!(parse_columns("5-3"), None);
        assert_eq!(parse_columns("-3"), None);
        assert_eq!(parse_columns("3-"), None);
        assert_eq!(parse_columns("1-2-3"), None);
        assert_eq!(parse_columns("1+2-3"), None);
        assert_eq!(parse_columns("1++2"), None);
        assert_eq!(parse_columns("99999999999"), None);
        assert_eq!(parse_columns("4294967295+1"), None);
    }

    #[test]
    fn reversed_range_is_reported_as_such() {
        assert_eq!(ColumnRange::try_from("5-3"), Err(ColumnError::ReversedRange("5-3".to_owned())));
        assert_eq!(ColumnRange::try_from("x"), Err(ColumnError::FormatError("x".to_owned())));
    }

    #[test]
    fn range_span() {
        let range = ColumnRange::new(7, 12).unwrap();
        assert_eq!(range.first(), 7);
        assert_eq!(range.last(), 12);
        assert_eq!(range.span(), 6);
        assert!(ColumnRange::new(3, 2).is_none());
        assert_eq!(range.to_string(), "7-12");
        assert_eq!(ColumnRange::new(4, 4).unwrap().to_string(), "4");
    }
}
