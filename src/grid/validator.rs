//! Grid validation: maps label lines onto the column grid of an installation.

use crate::grid::parser::parse_columns;
use crate::grid::parser::parse_line;
use crate::grid::parser::ColumnRange;
use crate::COLUMNS_PER_UNIT;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Shape of the label grid: fields × rows per field × columns per unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub fields: u32,
    pub rows_per_field: u32,
    pub columns_per_unit: u32,
}

impl GridShape {
    /// Grid with the standard unit width of [`COLUMNS_PER_UNIT`] columns.
    pub fn new(fields: u32, rows_per_field: u32) -> Self {
        GridShape {
            fields,
            rows_per_field,
            columns_per_unit: COLUMNS_PER_UNIT,
        }
    }

    /// Number of field/row units, each rendered as one label row and one content row.
    pub fn units(&self) -> u32 {
        self.fields.saturating_mul(self.rows_per_field)
    }

    pub fn max_columns(&self) -> u32 {
        self.units().saturating_mul(self.columns_per_unit)
    }
}

/// A label line that passed every validation gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidPlacement {
    pub columns: ColumnRange,
    pub description: String,
    /// Column spec as typed by the user.
    pub raw_spec: String,
}

/// Why a label line was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineErrorKind {
    /// No leading column spec.
    InvalidFormat,
    /// Column spec is not a number, range or plus-count, or the range is reversed.
    UnreadableColumns,
    /// Parts of the range outside `1..=max_columns`, at most one below and one above.
    OutOfRange { outside: Vec<ColumnRange>, max_columns: u32 },
    /// Columns already claimed by an earlier line.
    Overlap { columns: Vec<u32> },
}

/// Diagnostic for one rejected label line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub line: String,
    pub kind: LineErrorKind,
}

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(T::to_string).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zeile {}: ", self.line_number)?;
        match &self.kind {
            LineErrorKind::InvalidFormat => write!(f, "ungültiges Format"),
            LineErrorKind::UnreadableColumns => write!(f, "Spalten nicht erkennbar"),
            LineErrorKind::OutOfRange { outside, max_columns } => {
                write!(f, "Spalte(n) {} außerhalb des gültigen Bereichs 1-{}", join(outside), max_columns)
            }
            LineErrorKind::Overlap { columns } => write!(f, "Spalte(n) {} bereits belegt", join(columns)),
        }
    }
}

/// Result of one validation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    /// Accepted placements in input order.
    pub placements: Vec<ValidPlacement>,
    pub errors: Vec<LineError>,
    pub occupied: BTreeSet<u32>,
    pub max_columns: u32,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Columns of the grid not claimed by any placement.
    pub fn free_columns(&self) -> u32 {
        self.max_columns.saturating_sub(self.occupied.len() as u32)
    }
}

/// Validates label text against a grid shape.
///
/// Lines are checked in order; the first line claiming a column wins and every later
/// claim on it is an error. Blank lines are skipped and never count as errors.
pub fn validate(text: &str, shape: GridShape) -> Validation {
    let max_columns = shape.max_columns();
    let mut validation = Validation {
        placements: Vec::new(),
        errors: Vec::new(),
        occupied: BTreeSet::new(),
        max_columns,
    };

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match check_line(line, max_columns, &validation.occupied) {
            Ok(placement) => {
                validation.occupied.extend(placement.columns.columns());
                validation.placements.push(placement);
            }
            Err(kind) => {
                let error = LineError {
                    line_number: index + 1,
                    line: line.to_owned(),
                    kind,
                };
                debug!(%error, "label line rejected");
                validation.errors.push(error);
            }
        }
    }

    debug!(
        error_count = validation.error_count(),
        placements = validation.placements.len(),
        max_columns,
        "label validation finished"
    );
    validation
}

fn check_line(line: &str, max_columns: u32, occupied: &BTreeSet<u32>) -> Result<ValidPlacement, LineErrorKind> {
    let entry = parse_line(line).ok_or(LineErrorKind::InvalidFormat)?;
    let columns = parse_columns(&entry.column_spec).ok_or(LineErrorKind::UnreadableColumns)?;

    let outside = outside_columns(columns, max_columns);
    if !outside.is_empty() {
        return Err(LineErrorKind::OutOfRange { outside, max_columns });
    }

    let taken = columns
        .columns()
        .filter(|column| occupied.contains(column))
        .collect::<Vec<_>>();
    if !taken.is_empty() {
        return Err(LineErrorKind::Overlap { columns: taken });
    }

    Ok(ValidPlacement {
        columns,
        description: entry.description,
        raw_spec: entry.column_spec,
    })
}

/// Clips `columns` to the parts lying outside `1..=max_columns`.
fn outside_columns(columns: ColumnRange, max_columns: u32) -> Vec<ColumnRange> {
    let below = (columns.first() < 1)
        .then(|| ColumnRange::new(columns.first(), columns.last().min(0)))
        .flatten();
    let above = (columns.last() > max_columns)
        .then(|| ColumnRange::new(columns.first().max(max_columns + 1), columns.last()))
        .flatten();
    below.into_iter().chain(above).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_unit() -> GridShape {
        GridShape::new(1, 1)
    }

    fn out_of_range(parts: &[(u32, u32)]) -> LineErrorKind {
        LineErrorKind::OutOfRange {
            outside: parts.iter().map(|(first, last)| ColumnRange::new(*first, *last).unwrap()).collect(),
            max_columns: 12,
        }
    }

    #[test]
    fn accepts_all_three_grammars() {
        let validation = validate("1 Heizung\n3-6 Lüftung\n7+5 Elektrik", single_unit());

        assert!(validation.is_valid());
        assert_eq!(validation.error_count(), 0);
        assert_eq!(validation.max_columns, 12);
        let placements = validation
            .placements
            .iter()
            .map(|placement| (placement.columns.to_vec(), placement.description.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(placements, vec![
            (vec![1], "Heizung"),
            (vec![3, 4, 5, 6], "Lüftung"),
            (vec![7, 8, 9, 10, 11, 12], "Elektrik"),
        ]);
        assert_eq!(validation.occupied.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(validation.free_columns(), 1);
        assert_eq!(validation.placements[2].raw_spec, "7+5");
    }

    #[test]
    fn empty_text_is_valid_and_empty() {
        for text in ["", "\n\n", "   \n\t"] {
            let validation = validate(text, single_unit());
            assert!(validation.is_valid());
            assert!(validation.placements.is_empty());
            assert_eq!(validation.error_count(), 0);
            assert!(validation.occupied.is_empty());
        }
    }

    #[test]
    fn second_claim_on_a_column_is_an_error() {
        let validation = validate("1 A\n1 B", single_unit());

        assert!(!validation.is_valid());
        assert_eq!(validation.error_count(), 1);
        assert_eq!(validation.placements.len(), 1);
        assert_eq!(validation.placements[0].description, "A");
        assert_eq!(validation.errors[0].line_number, 2);
        assert_eq!(validation.errors[0].kind, LineErrorKind::Overlap { columns: vec![1] });
    }

    #[test]
    fn partial_overlap_names_only_taken_columns() {
        let validation = validate("3-5 A\n5-8 B", single_unit());
        assert_eq!(validation.errors[0].kind, LineErrorKind::Overlap { columns: vec![5] });
        assert_eq!(validation.errors[0].to_string(), "Zeile 2: Spalte(n) 5 bereits belegt");
    }

    #[test]
    fn out_of_range_columns() {
        let validation = validate("13 X", single_unit());
        assert_eq!(validation.error_count(), 1);
        assert_eq!(validation.errors[0].kind, out_of_range(&[(13, 13)]));
        assert_eq!(validation.errors[0].to_string(), "Zeile 1: Spalte(n) 13 außerhalb des gültigen Bereichs 1-12");

        let validation = validate("0 X\n11+2 Y\n0-14 Z", single_unit());
        assert_eq!(validation.error_count(), 3);
        assert_eq!(validation.errors[0].kind, out_of_range(&[(0, 0)]));
        assert_eq!(validation.errors[1].kind, out_of_range(&[(13, 13)]));
        assert_eq!(validation.errors[2].kind, out_of_range(&[(0, 0), (13, 14)]));
        assert_eq!(validation.errors[2].to_string(), "Zeile 3: Spalte(n) 0, 13-14 außerhalb des gültigen Bereichs 1-12");
        assert!(validation.occupied.is_empty());
    }

    #[test]
    fn huge_ranges_give_compact_diagnostics() {
        let validation = validate("1-4294967295 X\n4000000000+294967295 Y", single_unit());
        assert_eq!(validation.error_count(), 2);
        assert_eq!(validation.errors[0].kind, out_of_range(&[(13, u32::MAX)]));
        assert_eq!(
            validation.errors[0].to_string(),
            "Zeile 1: Spalte(n) 13-4294967295 außerhalb des gültigen Bereichs 1-12"
        );
        assert_eq!(validation.errors[1].kind, out_of_range(&[(4_000_000_000, u32::MAX)]));
        assert!(validation.placements.is_empty());
    }

    #[test]
    fn malformed_lines() {
        let validation = validate("Heizung\n5-3 Rückwärts\n\n1 OK", single_unit());
        assert_eq!(validation.error_count(), 2);
        assert_eq!(validation.errors[0].kind, LineErrorKind::InvalidFormat);
        assert_eq!(validation.errors[0].to_string(), "Zeile 1: ungültiges Format");
        assert_eq!(validation.errors[1].kind, LineErrorKind::UnreadableColumns);
        assert_eq!(validation.errors[1].line_number, 2);
        assert_eq!(validation.errors[1].to_string(), "Zeile 2: Spalten nicht erkennbar");
        assert_eq!(validation.placements.len(), 1);
    }

    #[test]
    fn max_columns_follows_shape() {
        let shape = GridShape::new(3, 7);
        assert_eq!(shape.units(), 21);
        assert_eq!(shape.max_columns(), 252);
        let validation = validate("250-252 Ende", shape);
        assert!(validation.is_valid());
        assert_eq!(validation.free_columns(), 249);
    }

    #[test]
    fn accepted_placements_are_disjoint_and_in_bounds() {
        let text = "1-4 A\n3 B\n5+3 C\n8 D\n9-30 E\n12 F\n13-24 G";
        let shape = GridShape::new(1, 2);
        let validation = validate(text, shape);
        let mut seen = BTreeSet::new();
        for placement in &validation.placements {
            for column in placement.columns.columns() {
                assert!((1..=shape.max_columns()).contains(&column));
                assert!(seen.insert(column), "column {} claimed twice", column);
            }
        }
        assert_eq!(validation.error_count(), 3);
    }

    #[test]
    fn validation_is_repeatable() {
        let text = "1 A\n1 B\n2-3 C\nfoo";
        assert_eq!(validate(text, single_unit()), validate(text, single_unit()));
    }
}
