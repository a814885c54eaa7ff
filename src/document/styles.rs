//! Style/layout builder: turns [`StyleSettings`] into the named ODF styles used by the
//! spreadsheet export.

use crate::document::names::*;
use crate::helpers::string::cm;
use crate::helpers::string::pt;
use crate::helpers::xml::Element;
use crate::settings::StyleSettings;

/// Name of the page layout referenced by the master page
pub const PAGE_LAYOUT_NAME: &str = "PageLayout1";
/// Name of the master page referenced by the table style
pub const MASTER_PAGE_NAME: &str = "Default";
/// Border declaration used when cell borders are enabled
const CELL_BORDER: &str = "0.5pt solid #000000";
/// Horizontal text alignment shared by all cell classes
const TEXT_ALIGN: &str = "center";
/// Vertical alignment shared by all cell classes
const VERTICAL_ALIGN: &str = "top";

/// Column width style
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStyle {
    pub name: &'static str,
    /// Width in centimeters
    pub width: f64,
}

/// Row height style
#[derive(Clone, Debug, PartialEq)]
pub struct RowStyle {
    pub name: &'static str,
    /// Height in centimeters
    pub height: f64,
}

/// Cell style: font, alignment, wrapping and optional border.
#[derive(Clone, Debug, PartialEq)]
pub struct CellStyle {
    pub name: &'static str,
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub text_align: &'static str,
    pub vertical_align: &'static str,
    pub wrap: bool,
    pub border: Option<&'static str>,
}

/// Table style bound to a master page
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    pub name: &'static str,
    pub master_page: &'static str,
}

/// Page geometry in centimeters. Always printed landscape.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

/// Paragraph and frame styles of the watermark stamp
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkStyle {
    pub text: String,
    pub paragraph_name: &'static str,
    pub graphic_name: &'static str,
    /// Font size in points
    pub font_size: f64,
    pub color: &'static str,
}

/// Every style the spreadsheet export references, derived from one settings record.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleBundle {
    pub column: ColumnStyle,
    pub label_row: RowStyle,
    pub content_row: RowStyle,
    pub merged_cell: CellStyle,
    pub label_cell: CellStyle,
    pub content_cell: CellStyle,
    pub table: TableStyle,
    pub page_layout: PageLayout,
    pub watermark: Option<WatermarkStyle>,
}

/// Builds the style bundle for `settings`. Pure; the border flag applies to all
/// three cell classes alike.
pub fn build_styles(settings: &StyleSettings) -> StyleBundle {
    let border = settings.cell_border.then_some(CELL_BORDER);
    let cell = |name, font_size, bold| CellStyle {
        name,
        font_size,
        bold,
        text_align: TEXT_ALIGN,
        vertical_align: VERTICAL_ALIGN,
        wrap: true,
        border,
    };

    StyleBundle {
        column: ColumnStyle {
            name: "SpaltenBreite",
            width: settings.column_width,
        },
        label_row: RowStyle {
            name: "BeschriftungRow",
            height: settings.label_row_height,
        },
        content_row: RowStyle {
            name: "InhaltRow",
            height: settings.content_row_height,
        },
        merged_cell: cell("GemergteZelle", settings.merged_font_size, true),
        label_cell: cell("BeschriftungZelle", settings.label_font_size, true),
        content_cell: cell("InhaltZelle", settings.content_font_size, false),
        table: TableStyle {
            name: "MainTable",
            master_page: MASTER_PAGE_NAME,
        },
        page_layout: PageLayout {
            name: PAGE_LAYOUT_NAME,
            width: settings.page_width,
            height: settings.page_height,
            margin_top: settings.margin_top,
            margin_bottom: settings.margin_bottom,
            margin_left: settings.margin_left,
            margin_right: settings.margin_right,
        },
        watermark: settings.watermark_text().map(|text| WatermarkStyle {
            text: text.to_owned(),
            paragraph_name: "WasserzeichenText",
            graphic_name: "WasserzeichenRahmen",
            font_size: 6.0,
            color: "#999999",
        }),
    }
}

fn style(name: &str, family: &str) -> Element {
    Element::new(STYLE_STYLE)
        .attr(STYLE_NAME, name)
        .attr(STYLE_FAMILY, family)
}

impl ColumnStyle {
    pub(crate) fn to_element(&self) -> Element {
        style(self.name, "table-column")
            .child(Element::new(STYLE_TABLE_COLUMN_PROPERTIES).attr(STYLE_COLUMN_WIDTH, cm(self.width)))
    }
}

impl RowStyle {
    pub(crate) fn to_element(&self) -> Element {
        style(self.name, "table-row")
            .child(Element::new(STYLE_TABLE_ROW_PROPERTIES).attr(STYLE_ROW_HEIGHT, cm(self.height)))
    }
}

impl CellStyle {
    pub(crate) fn to_element(&self) -> Element {
        let mut cell_properties = Element::new(STYLE_TABLE_CELL_PROPERTIES)
            .attr(STYLE_VERTICAL_ALIGN, self.vertical_align);
        if self.wrap {
            cell_properties.set_attr(FO_WRAP_OPTION, "wrap");
        }
        if let Some(border) = self.border {
            cell_properties.set_attr(FO_BORDER, border);
        }

        let mut text_properties = Element::new(STYLE_TEXT_PROPERTIES).attr(FO_FONT_SIZE, pt(self.font_size));
        if self.bold {
            text_properties.set_attr(FO_FONT_WEIGHT, "bold");
        }

        style(self.name, "table-cell")
            .child(cell_properties)
            .child(text_properties)
            .child(Element::new(STYLE_PARAGRAPH_PROPERTIES).attr(FO_TEXT_ALIGN, self.text_align))
    }
}

impl TableStyle {
    pub(crate) fn to_element(&self) -> Element {
        style(self.name, "table")
            .attr(STYLE_MASTER_PAGE_NAME, self.master_page)
            .child(Element::new(STYLE_TABLE_PROPERTIES).attr(TABLE_DISPLAY, "true"))
    }
}

impl PageLayout {
    pub(crate) fn to_element(&self) -> Element {
        Element::new(STYLE_PAGE_LAYOUT).attr(STYLE_NAME, self.name).child(
            Element::new(STYLE_PAGE_LAYOUT_PROPERTIES)
                .attr(FO_PAGE_WIDTH, cm(self.width))
                .attr(FO_PAGE_HEIGHT, cm(self.height))
                .attr(FO_MARGIN_TOP, cm(self.margin_top))
                .attr(FO_MARGIN_BOTTOM, cm(self.margin_bottom))
                .attr(FO_MARGIN_LEFT, cm(self.margin_left))
                .attr(FO_MARGIN_RIGHT, cm(self.margin_right))
                .attr(STYLE_PRINT_ORIENTATION, "landscape"),
        )
    }

    /// Master page using this layout
    pub(crate) fn master_page(&self) -> Element {
        Element::new(STYLE_MASTER_PAGE)
            .attr(STYLE_NAME, MASTER_PAGE_NAME)
            .attr(STYLE_PAGE_LAYOUT_NAME, self.name)
    }
}

impl WatermarkStyle {
    /// Paragraph style and graphic style of the stamp frame.
    pub(crate) fn to_elements(&self) -> [Element; 2] {
        let paragraph = style(self.paragraph_name, "paragraph").child(
            Element::new(STYLE_TEXT_PROPERTIES)
                .attr(FO_FONT_SIZE, pt(self.font_size))
                .attr(FO_COLOR, self.color),
        );
        let graphic = style(self.graphic_name, "graphic").child(
            Element::new(STYLE_GRAPHIC_PROPERTIES)
                .attr(DRAW_STROKE, "none")
                .attr(DRAW_FILL, "none")
                .attr(STYLE_PROTECT, "position size"),
        );
        [paragraph, graphic]
    }
}

impl StyleBundle {
    /// Root of `styles.xml`: named cell and watermark styles, the page layout and the
    /// master page.
    pub fn styles_document(&self) -> Element {
        let mut styles = Element::new(OFFICE_STYLES)
            .child(self.merged_cell.to_element())
            .child(self.label_cell.to_element())
            .child(self.content_cell.to_element());
        if let Some(watermark) = &self.watermark {
            for element in watermark.to_elements() {
                styles.push(element);
            }
        }

        Element::new(OFFICE_DOCUMENT_STYLES)
            .attr(OFFICE_VERSION, ODF_VERSION)
            .child(styles)
            .child(Element::new(OFFICE_AUTOMATIC_STYLES).child(self.page_layout.to_element()))
            .child(Element::new(OFFICE_MASTER_STYLES).child(self.page_layout.master_page()))
    }

    /// Automatic styles of `content.xml`: column, rows and table.
    pub fn content_automatic_styles(&self) -> Element {
        Element::new(OFFICE_AUTOMATIC_STYLES)
            .child(self.column.to_element())
            .child(self.label_row.to_element())
            .child(self.content_row.to_element())
            .child(self.table.to_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::xml::to_xml_bytes;

    fn find<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
        root.elements().find(|element| element.attribute(STYLE_NAME) == Some(name)).or_else(|| {
            root.elements().find_map(|element| find(element, name))
        })
    }

    #[test]
    fn defaults_produce_bordered_landscape_styles() {
        let bundle = build_styles(&StyleSettings::default());

        assert_eq!(bundle.column.width, 1.75);
        assert_eq!(bundle.label_row.height, 0.5);
        assert_eq!(bundle.content_row.height, 1.5);
        assert!(bundle.merged_cell.bold && bundle.label_cell.bold && !bundle.content_cell.bold);
        assert_eq!(bundle.content_cell.font_size, 6.0);
        for cell in [&bundle.merged_cell, &bundle.label_cell, &bundle.content_cell] {
            assert_eq!(cell.border, Some(CELL_BORDER));
            assert_eq!(cell.text_align, "center");
            assert_eq!(cell.vertical_align, "top");
            assert!(cell.wrap);
        }
        assert_eq!(bundle.page_layout.width, 29.7);
        assert_eq!(bundle.watermark, None);
    }

    #[test]
    fn border_flag_applies_to_all_cells() {
        let settings = StyleSettings {
            cell_border: false,
            ..StyleSettings::default()
        };
        let bundle = build_styles(&settings);
        for cell in [&bundle.merged_cell, &bundle.label_cell, &bundle.content_cell] {
            assert_eq!(cell.border, None);
            let element = cell.to_element();
            let properties = element.elements().next().unwrap();
            assert_eq!(properties.attribute(FO_BORDER), None);
        }
    }

    #[test]
    fn styles_document_layout() {
        let settings = StyleSettings {
            margin_top: 2.5,
            watermark: Some("Entwurf".to_owned()),
            ..StyleSettings::default()
        };
        let root = build_styles(&settings).styles_document();

        let page_layout = find(&root, PAGE_LAYOUT_NAME).unwrap();
        let properties = page_layout.elements().next().unwrap();
        assert_eq!(properties.attribute(FO_MARGIN_TOP), Some("2.5cm"));
        assert_eq!(properties.attribute(FO_PAGE_HEIGHT), Some("21cm"));
        assert_eq!(properties.attribute(STYLE_PRINT_ORIENTATION), Some("landscape"));

        let master_page = find(&root, MASTER_PAGE_NAME).unwrap();
        assert_eq!(master_page.attribute(STYLE_PAGE_LAYOUT_NAME), Some(PAGE_LAYOUT_NAME));

        let merged = find(&root, "GemergteZelle").unwrap();
        assert_eq!(merged.attribute(STYLE_FAMILY), Some("table-cell"));
        assert!(find(&root, "WasserzeichenText").is_some());
        assert!(find(&root, "WasserzeichenRahmen").is_some());

        let xml = String::from_utf8(to_xml_bytes(&root).unwrap()).unwrap();
        assert!(xml.contains(r#"fo:font-size="7pt""#));
        assert!(xml.contains(r##"fo:color="#999999""##));
        assert!(xml.contains("xmlns:fo="));
    }

    #[test]
    fn content_styles_bind_table_to_master_page() {
        let automatic = build_styles(&StyleSettings::default()).content_automatic_styles();
        let table = find(&automatic, "MainTable").unwrap();
        assert_eq!(table.attribute(STYLE_MASTER_PAGE_NAME), Some(MASTER_PAGE_NAME));
        let column = find(&automatic, "SpaltenBreite").unwrap();
        assert_eq!(column.elements().next().unwrap().attribute(STYLE_COLUMN_WIDTH), Some("1.75cm"));
    }
}
