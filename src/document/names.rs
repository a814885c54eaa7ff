//! Qualified ODF element and attribute names used by the document builders.

use crate::helpers::xml::Namespace::Draw;
use crate::helpers::xml::Namespace::Fo;
use crate::helpers::xml::Namespace::Manifest;
use crate::helpers::xml::Namespace::Meta;
use crate::helpers::xml::Namespace::Office;
use crate::helpers::xml::Namespace::Style;
use crate::helpers::xml::Namespace::Svg;
use crate::helpers::xml::Namespace::Table;
use crate::helpers::xml::Namespace::Text;
use crate::helpers::xml::QualifiedName;

// office
pub(crate) const OFFICE_DOCUMENT_CONTENT: QualifiedName = Office.name("document-content");
pub(crate) const OFFICE_DOCUMENT_STYLES: QualifiedName = Office.name("document-styles");
pub(crate) const OFFICE_DOCUMENT_META: QualifiedName = Office.name("document-meta");
pub(crate) const OFFICE_VERSION: QualifiedName = Office.name("version");
pub(crate) const OFFICE_META: QualifiedName = Office.name("meta");
pub(crate) const OFFICE_STYLES: QualifiedName = Office.name("styles");
pub(crate) const OFFICE_AUTOMATIC_STYLES: QualifiedName = Office.name("automatic-styles");
pub(crate) const OFFICE_MASTER_STYLES: QualifiedName = Office.name("master-styles");
pub(crate) const OFFICE_BODY: QualifiedName = Office.name("body");
pub(crate) const OFFICE_SPREADSHEET: QualifiedName = Office.name("spreadsheet");
pub(crate) const OFFICE_TEXT: QualifiedName = Office.name("text");

// style
pub(crate) const STYLE_STYLE: QualifiedName = Style.name("style");
pub(crate) const STYLE_NAME: QualifiedName = Style.name("name");
pub(crate) const STYLE_FAMILY: QualifiedName = Style.name("family");
pub(crate) const STYLE_PAGE_LAYOUT: QualifiedName = Style.name("page-layout");
pub(crate) const STYLE_PAGE_LAYOUT_PROPERTIES: QualifiedName = Style.name("page-layout-properties");
pub(crate) const STYLE_PRINT_ORIENTATION: QualifiedName = Style.name("print-orientation");
pub(crate) const STYLE_MASTER_PAGE: QualifiedName = Style.name("master-page");
pub(crate) const STYLE_MASTER_PAGE_NAME: QualifiedName = Style.name("master-page-name");
pub(crate) const STYLE_PAGE_LAYOUT_NAME: QualifiedName = Style.name("page-layout-name");
pub(crate) const STYLE_TABLE_COLUMN_PROPERTIES: QualifiedName = Style.name("table-column-properties");
pub(crate) const STYLE_COLUMN_WIDTH: QualifiedName = Style.name("column-width");
pub(crate) const STYLE_TABLE_ROW_PROPERTIES: QualifiedName = Style.name("table-row-properties");
pub(crate) const STYLE_ROW_HEIGHT: QualifiedName = Style.name("row-height");
pub(crate) const STYLE_TABLE_CELL_PROPERTIES: QualifiedName = Style.name("table-cell-properties");
pub(crate) const STYLE_VERTICAL_ALIGN: QualifiedName = Style.name("vertical-align");
pub(crate) const STYLE_TEXT_PROPERTIES: QualifiedName = Style.name("text-properties");
pub(crate) const STYLE_PARAGRAPH_PROPERTIES: QualifiedName = Style.name("paragraph-properties");
pub(crate) const STYLE_GRAPHIC_PROPERTIES: QualifiedName = Style.name("graphic-properties");
pub(crate) const STYLE_PROTECT: QualifiedName = Style.name("protect");
pub(crate) const STYLE_TABLE_PROPERTIES: QualifiedName = Style.name("table-properties");

// fo
pub(crate) const FO_PAGE_WIDTH: QualifiedName = Fo.name("page-width");
pub(crate) const FO_PAGE_HEIGHT: QualifiedName = Fo.name("page-height");
pub(crate) const FO_MARGIN_TOP: QualifiedName = Fo.name("margin-top");
pub(crate) const FO_MARGIN_BOTTOM: QualifiedName = Fo.name("margin-bottom");
pub(crate) const FO_MARGIN_LEFT: QualifiedName = Fo.name("margin-left");
pub(crate) const FO_MARGIN_RIGHT: QualifiedName = Fo.name("margin-right");
pub(crate) const FO_BORDER: QualifiedName = Fo.name("border");
pub(crate) const FO_WRAP_OPTION: QualifiedName = Fo.name("wrap-option");
pub(crate) const FO_FONT_SIZE: QualifiedName = Fo.name("font-size");
pub(crate) const FO_FONT_WEIGHT: QualifiedName = Fo.name("font-weight");
pub(crate) const FO_COLOR: QualifiedName = Fo.name("color");
pub(crate) const FO_TEXT_ALIGN: QualifiedName = Fo.name("text-align");

// table
pub(crate) const TABLE_TABLE: QualifiedName = Table.name("table");
pub(crate) const TABLE_NAME: QualifiedName = Table.name("name");
pub(crate) const TABLE_STYLE_NAME: QualifiedName = Table.name("style-name");
pub(crate) const TABLE_DISPLAY: QualifiedName = Table.name("display");
pub(crate) const TABLE_TABLE_COLUMN: QualifiedName = Table.name("table-column");
pub(crate) const TABLE_NUMBER_COLUMNS_REPEATED: QualifiedName = Table.name("number-columns-repeated");
pub(crate) const TABLE_TABLE_ROW: QualifiedName = Table.name("table-row");
pub(crate) const TABLE_TABLE_CELL: QualifiedName = Table.name("table-cell");
pub(crate) const TABLE_COVERED_TABLE_CELL: QualifiedName = Table.name("covered-table-cell");
pub(crate) const TABLE_NUMBER_COLUMNS_SPANNED: QualifiedName = Table.name("number-columns-spanned");

// text
pub(crate) const TEXT_P: QualifiedName = Text.name("p");
pub(crate) const TEXT_H: QualifiedName = Text.name("h");
pub(crate) const TEXT_SPAN: QualifiedName = Text.name("span");
pub(crate) const TEXT_S: QualifiedName = Text.name("s");
pub(crate) const TEXT_C: QualifiedName = Text.name("c");
pub(crate) const TEXT_STYLE_NAME: QualifiedName = Text.name("style-name");
pub(crate) const TEXT_OUTLINE_LEVEL: QualifiedName = Text.name("outline-level");

// draw / svg
pub(crate) const DRAW_FRAME: QualifiedName = Draw.name("frame");
pub(crate) const DRAW_TEXT_BOX: QualifiedName = Draw.name("text-box");
pub(crate) const DRAW_NAME: QualifiedName = Draw.name("name");
pub(crate) const DRAW_STYLE_NAME: QualifiedName = Draw.name("style-name");
pub(crate) const DRAW_TEXT_STYLE_NAME: QualifiedName = Draw.name("text-style-name");
pub(crate) const DRAW_Z_INDEX: QualifiedName = Draw.name("z-index");
pub(crate) const DRAW_STROKE: QualifiedName = Draw.name("stroke");
pub(crate) const DRAW_FILL: QualifiedName = Draw.name("fill");
pub(crate) const SVG_X: QualifiedName = Svg.name("x");
pub(crate) const SVG_Y: QualifiedName = Svg.name("y");
pub(crate) const SVG_WIDTH: QualifiedName = Svg.name("width");
pub(crate) const SVG_HEIGHT: QualifiedName = Svg.name("height");

// meta
pub(crate) const META_GENERATOR: QualifiedName = Meta.name("generator");
pub(crate) const META_CREATION_DATE: QualifiedName = Meta.name("creation-date");

// manifest
pub(crate) const MANIFEST_MANIFEST: QualifiedName = Manifest.name("manifest");
pub(crate) const MANIFEST_VERSION: QualifiedName = Manifest.name("version");
pub(crate) const MANIFEST_FILE_ENTRY: QualifiedName = Manifest.name("file-entry");
pub(crate) const MANIFEST_FULL_PATH: QualifiedName = Manifest.name("full-path");
pub(crate) const MANIFEST_MEDIA_TYPE: QualifiedName = Manifest.name("media-type");

/// ODF version written to every root element.
pub(crate) const ODF_VERSION: &str = "1.2";
