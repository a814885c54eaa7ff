//! ODS document builder.
//!
//! Lays the validated placements onto a table that is one unit wide. Every field/row
//! unit becomes a label row holding the absolute column numbers, followed by a content
//! row holding the descriptions as spanned cells.

use crate::document::names::*;
use crate::document::styles::StyleBundle;
use crate::grid::GridShape;
use crate::grid::ValidPlacement;
use crate::helpers::string::cm;
use crate::helpers::xml::Element;
use std::collections::BTreeMap;

/// Height of the watermark frame in centimeters
const WATERMARK_HEIGHT: f64 = 0.3;

/// Whether a row holds column numbers or descriptions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    Label,
    Content,
}

/// One logical cell of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetCell {
    /// Absolute column number in a label row
    Label(u32),
    /// Placement description spanning `span` columns, one entry per text line
    Merged { lines: Vec<String>, span: u32 },
    /// Content cell not claimed by any placement
    Empty,
    /// Filler continuing a spanned cell
    Covered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: Vec<SheetCell>,
    /// Stamp the watermark frame into the first cell of this row
    pub watermark: bool,
}

impl SheetRow {
    /// Number of cell elements in this row, covered fillers included.
    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

/// Logical table built in memory before serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spreadsheet {
    pub name: String,
    pub columns: u32,
    pub rows: Vec<SheetRow>,
}

/// The watermark goes into the label row of every second unit, which are table rows
/// 1, 5, 9, ... counted from 1.
fn carries_watermark(unit_index: u32) -> bool {
    unit_index % 2 == 0
}

/// Splits a description at the line break marker. An empty marker keeps the text whole.
fn split_lines(description: &str, line_break: &str) -> Vec<String> {
    if line_break.is_empty() {
        return vec![description.trim().to_owned()];
    }
    description
        .split(line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Lays out `placements` on a table of `shape.units()` label/content row pairs.
///
/// # Arguments
/// * `name` - Table name
/// * `shape` - Grid dimensions
/// * `placements` - Accepted placements in any order
/// * `line_break` - Marker splitting a description into several lines
///
/// A placement spanning past the end of its unit is cut at the unit boundary; the
/// remainder is not carried into the next unit.
pub fn build_spreadsheet(name: &str, shape: GridShape, placements: &[ValidPlacement], line_break: &str) -> Spreadsheet {
    let mut sorted = placements.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|placement| placement.columns.first());
    let by_first_column = sorted
        .into_iter()
        .map(|placement| (placement.columns.first(), placement))
        .collect::<BTreeMap<_, _>>();

    let width = shape.columns_per_unit;
    let mut rows = Vec::with_capacity(shape.units() as usize * 2);
    let mut cursor = 1;

    for unit_index in 0..shape.units() {
        rows.push(SheetRow {
            kind: RowKind::Label,
            cells: (0..width).map(|offset| SheetCell::Label(cursor + offset)).collect(),
            watermark: carries_watermark(unit_index),
        });

        let mut cells = Vec::with_capacity(width as usize);
        let mut offset = 0;
        while offset < width {
            match by_first_column.get(&(cursor + offset)) {
                Some(placement) => {
                    let span = placement.columns.span().min(width - offset);
                    cells.push(SheetCell::Merged {
                        lines: split_lines(&placement.description, line_break),
                        span,
                    });
                    cells.extend((1..span).map(|_| SheetCell::Covered));
                    offset += span;
                }
                None => {
                    cells.push(SheetCell::Empty);
                    offset += 1;
                }
            }
        }
        rows.push(SheetRow {
            kind: RowKind::Content,
            cells,
            watermark: false,
        });

        cursor += width;
    }

    Spreadsheet {
        name: name.to_owned(),
        columns: width,
        rows,
    }
}

fn paragraph(text: impl Into<String>) -> Element {
    Element::new(TEXT_P).text(text)
}

impl Spreadsheet {
    /// Root of `content.xml`.
    pub fn content_document(&self, styles: &StyleBundle) -> Element {
        let mut table = Element::new(TABLE_TABLE)
            .attr(TABLE_NAME, self.name.as_str())
            .attr(TABLE_STYLE_NAME, styles.table.name)
            .child(
                Element::new(TABLE_TABLE_COLUMN)
                    .attr(TABLE_STYLE_NAME, styles.column.name)
                    .attr(TABLE_NUMBER_COLUMNS_REPEATED, self.columns.to_string()),
            );

        let mut frames = 0;
        for row in &self.rows {
            let row_style = match row.kind {
                RowKind::Label => styles.label_row.name,
                RowKind::Content => styles.content_row.name,
            };
            let mut element = Element::new(TABLE_TABLE_ROW).attr(TABLE_STYLE_NAME, row_style);
            for (index, cell) in row.cells.iter().enumerate() {
                let mut cell = cell_element(cell, styles);
                if index == 0 && row.watermark {
                    if let Some(frame) = watermark_frame(styles, frames + 1) {
                        cell.push(frame);
                        frames += 1;
                    }
                }
                element.push(cell);
            }
            table.push(element);
        }

        Element::new(OFFICE_DOCUMENT_CONTENT)
            .attr(OFFICE_VERSION, ODF_VERSION)
            .child(styles.content_automatic_styles())
            .child(Element::new(OFFICE_BODY).child(Element::new(OFFICE_SPREADSHEET).child(table)))
    }
}

fn cell_element(cell: &SheetCell, styles: &StyleBundle) -> Element {
    match cell {
        SheetCell::Label(column) => Element::new(TABLE_TABLE_CELL)
            .attr(TABLE_STYLE_NAME, styles.label_cell.name)
            .child(paragraph(column.to_string())),
        SheetCell::Merged { lines, span } => {
            let mut element = Element::new(TABLE_TABLE_CELL).attr(TABLE_STYLE_NAME, styles.merged_cell.name);
            if *span > 1 {
                element.set_attr(TABLE_NUMBER_COLUMNS_SPANNED, span.to_string());
            }
            for line in lines {
                element.push(paragraph(line.as_str()));
            }
            element
        }
        SheetCell::Empty => Element::new(TABLE_TABLE_CELL).attr(TABLE_STYLE_NAME, styles.content_cell.name),
        SheetCell::Covered => Element::new(TABLE_COVERED_TABLE_CELL),
    }
}

/// Text frame anchored in a label cell, its bottom edge on the bottom of the row.
fn watermark_frame(styles: &StyleBundle, number: u32) -> Option<Element> {
    let watermark = styles.watermark.as_ref()?;
    let height = WATERMARK_HEIGHT.min(styles.label_row.height);
    let y = (styles.label_row.height - height).max(0.0);
    let frame = Element::new(DRAW_FRAME)
        .attr(DRAW_NAME, format!("Wasserzeichen{}", number))
        .attr(DRAW_STYLE_NAME, watermark.graphic_name)
        .attr(DRAW_TEXT_STYLE_NAME, watermark.paragraph_name)
        .attr(DRAW_Z_INDEX, "0")
        .attr(SVG_X, cm(0.0))
        .attr(SVG_Y, cm(y))
        .attr(SVG_WIDTH, cm(styles.column.width * 4.0))
        .attr(SVG_HEIGHT, cm(height))
        .child(
            Element::new(DRAW_TEXT_BOX).child(
                Element::new(TEXT_P)
                    .attr(TEXT_STYLE_NAME, watermark.paragraph_name)
                    .text(watermark.text.as_str()),
            ),
        );
    Some(frame)
}
