//! ODT document builder: a customer and its installations as a flat stream of headings
//! and paragraphs. Empty fields are left out instead of being printed blank.

use crate::document::names::*;
use crate::helpers::string::pt;
use crate::helpers::xml::Element;
use crate::records::Customer;
use crate::records::Installation;

/// Paragraph style of top level headings
const HEADING_1: &str = "H1";
/// Paragraph style of installation headings
const HEADING_2: &str = "H2";
/// Text style of field labels
const BOLD: &str = "Bold";
/// Spaces in front of group members
const GROUP_INDENT: &str = "2";

/// Accumulates the body of `office:text`.
struct TextBody {
    text: Element,
}

impl TextBody {
    fn new() -> Self {
        TextBody {
            text: Element::new(OFFICE_TEXT),
        }
    }

    fn heading(&mut self, level: u8, style: &str, text: String) {
        self.text.push(
            Element::new(TEXT_H)
                .attr(TEXT_STYLE_NAME, style)
                .attr(TEXT_OUTLINE_LEVEL, level.to_string())
                .text(text),
        );
    }

    fn blank(&mut self) {
        self.text.push(Element::new(TEXT_P));
    }

    fn plain(&mut self, text: &str) {
        self.text.push(Element::new(TEXT_P).text(text));
    }

    fn label(label: &str) -> Element {
        Element::new(TEXT_SPAN).attr(TEXT_STYLE_NAME, BOLD).text(format!("{}:", label))
    }

    /// Bold label followed by the value; skipped when the value is empty.
    fn field(&mut self, label: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.text.push(
            Element::new(TEXT_P)
                .child(Self::label(label))
                .text(format!(" {}", value)),
        );
    }

    /// Group header followed by its indented non-empty members. Nothing at all is
    /// written when every member is empty.
    fn group(&mut self, title: &str, members: &[(&str, &str)]) {
        if members.iter().all(|(_, value)| value.is_empty()) {
            return;
        }
        self.text.push(Element::new(TEXT_P).child(Self::label(title)));
        for (label, value) in members.iter().filter(|(_, value)| !value.is_empty()) {
            self.indented(&format!("{}: {}", label, value));
        }
    }

    fn indented(&mut self, text: &str) {
        self.text.push(
            Element::new(TEXT_P)
                .child(Element::new(TEXT_S).attr(TEXT_C, GROUP_INDENT))
                .text(text),
        );
    }
}

fn paragraph_style(name: &str, font_size: f64) -> Element {
    Element::new(STYLE_STYLE)
        .attr(STYLE_NAME, name)
        .attr(STYLE_FAMILY, "paragraph")
        .child(
            Element::new(STYLE_TEXT_PROPERTIES)
                .attr(FO_FONT_SIZE, pt(font_size))
                .attr(FO_FONT_WEIGHT, "bold"),
        )
}

fn automatic_styles() -> Element {
    Element::new(OFFICE_AUTOMATIC_STYLES)
        .child(paragraph_style(HEADING_1, 15.0))
        .child(paragraph_style(HEADING_2, 13.0))
        .child(
            Element::new(STYLE_STYLE)
                .attr(STYLE_NAME, BOLD)
                .attr(STYLE_FAMILY, "text")
                .child(Element::new(STYLE_TEXT_PROPERTIES).attr(FO_FONT_WEIGHT, "bold")),
        )
}

fn write_installation(body: &mut TextBody, installation: &Installation) {
    body.heading(2, HEADING_2, format!("{}. {}", installation.id, installation.display_name()));
    body.field("Code", installation.code.as_str());
    body.field("Bemerkung", installation.remark.as_str());
    body.group("Lokalisierung", &[
        ("Name", installation.name.as_str()),
        ("Adresse", installation.address.as_str()),
        ("PLZ/Ort", installation.zip_city.as_str()),
        ("Gebäude", installation.building.as_str()),
        ("Geschoss", installation.floor.as_str()),
        ("Raum", installation.room.as_str()),
        ("Funktion", installation.function.as_str()),
    ]);
    body.group("Zähler", &[
        ("Zählernummer", installation.meter_number.as_str()),
        ("Zählerstand", installation.meter_reading.as_str()),
    ]);
    body.field(
        "Export-Konfiguration",
        &format!("{} Felder × {} Reihen", installation.fields, installation.rows),
    );

    let lines = installation
        .label_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    if !lines.is_empty() {
        body.text.push(Element::new(TEXT_P).child(TextBody::label("Beschriftungen")));
        for line in lines {
            body.indented(line);
        }
    }
    body.blank();
}

/// Root of `content.xml` for a customer report.
pub fn build_customer_document(customer: &Customer) -> Element {
    let mut body = TextBody::new();
    let name = match customer.name.trim() {
        "" => "Unbekannt",
        name => name,
    };
    body.heading(1, HEADING_1, format!("Kunde: {}", name));
    body.blank();

    body.field("Projekt", &customer.project);
    body.field("Datum", &customer.date);
    body.field("Adresse", &customer.address);
    body.field("PLZ", &customer.zip);
    body.field("Ort", &customer.city);
    body.field("Ansprechpartner", &customer.contact);
    body.field("Telefon", &customer.phone);
    body.field("E-Mail", &customer.email);
    body.blank();

    body.heading(1, HEADING_1, "Anlagen".to_owned());
    body.blank();
    if customer.installations.is_empty() {
        body.plain("Keine Anlagen vorhanden.");
    }
    for installation in &customer.installations {
        write_installation(&mut body, installation);
    }

    Element::new(OFFICE_DOCUMENT_CONTENT)
        .attr(OFFICE_VERSION, ODF_VERSION)
        .child(automatic_styles())
        .child(Element::new(OFFICE_BODY).child(body.text))
}
