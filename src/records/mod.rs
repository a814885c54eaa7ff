//! # Customer and installation records
//!
//! Typed forms of the records kept by the data layer. Missing keys resolve to their
//! defaults once, at deserialization time.

pub mod migration;

use crate::error::ExportError;
use crate::grid::GridShape;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One distribution board ("Anlage") of a customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Installation {
    pub id: u32,
    #[serde(rename = "beschreibung")]
    pub description: String,
    pub name: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "plz_ort")]
    pub zip_city: String,
    #[serde(rename = "raum")]
    pub room: String,
    #[serde(rename = "gebaeude")]
    pub building: String,
    #[serde(rename = "geschoss")]
    pub floor: String,
    #[serde(rename = "funktion")]
    pub function: String,
    #[serde(rename = "zaehlernummer")]
    pub meter_number: String,
    #[serde(rename = "zaehlerstand")]
    pub meter_reading: String,
    pub code: String,
    #[serde(rename = "bemerkung")]
    pub remark: String,
    #[serde(rename = "felder")]
    pub fields: u32,
    #[serde(rename = "reihen")]
    pub rows: u32,
    /// Label lines, one placement per line.
    #[serde(rename = "text_inhalt")]
    pub label_text: String,
}

impl Default for Installation {
    fn default() -> Self {
        Installation {
            id: 0,
            description: String::new(),
            name: String::new(),
            address: String::new(),
            zip_city: String::new(),
            room: String::new(),
            building: String::new(),
            floor: String::new(),
            function: String::new(),
            meter_number: String::new(),
            meter_reading: String::new(),
            code: String::new(),
            remark: String::new(),
            fields: 3,
            rows: 7,
            label_text: String::new(),
        }
    }
}

impl Installation {
    pub fn grid_shape(&self) -> GridShape {
        GridShape::new(self.fields, self.rows)
    }

    /// Description, or `Anlage <id>` when none was entered.
    pub fn display_name(&self) -> String {
        match self.description.trim() {
            "" => format!("Anlage {}", self.id),
            description => description.to_owned(),
        }
    }
}

/// A customer ("Kunde") with its installations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: u32,
    /// Customer name; the key of the customer in the data file wins when both exist.
    #[serde(rename = "kundenname")]
    pub name: String,
    #[serde(rename = "projekt")]
    pub project: String,
    #[serde(rename = "datum")]
    pub date: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "plz")]
    pub zip: String,
    #[serde(rename = "ort")]
    pub city: String,
    #[serde(rename = "ansprechpartner")]
    pub contact: String,
    #[serde(rename = "telefonnummer")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "anlagen")]
    pub installations: Vec<Installation>,
    #[serde(rename = "next_anlage_id")]
    pub next_installation_id: u32,
}

/// All customers of the data file, keyed by customer name.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordStore {
    pub customers: BTreeMap<String, Customer>,
    pub next_customer_id: u32,
}

#[derive(Serialize, Deserialize)]
struct DataFile {
    #[serde(rename = "kunden", default)]
    customers: BTreeMap<String, Customer>,
    #[serde(rename = "next_kunden_id", default = "first_id")]
    next_customer_id: u32,
    #[serde(default)]
    schema_version: u64,
}

fn first_id() -> u32 {
    1
}

impl RecordStore {
    /// Parses a data file of any known schema version.
    pub fn from_json(text: &str) -> Result<Self, ExportError> {
        let document = migration::migrate(serde_json::from_str::<Value>(text)?);
        let data: DataFile = serde_json::from_value(document)?;
        let customers = data
            .customers
            .into_iter()
            .map(|(name, mut customer)| {
                customer.name.clone_from(&name);
                (name, customer)
            })
            .collect();
        Ok(RecordStore {
            customers,
            next_customer_id: data.next_customer_id,
        })
    }

    /// Serializes in the current schema version.
    pub fn to_json(&self) -> Result<String, ExportError> {
        let data = DataFile {
            customers: self.customers.clone(),
            next_customer_id: self.next_customer_id,
            schema_version: migration::CURRENT_SCHEMA_VERSION,
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_at_load() {
        let installation: Installation = serde_json::from_str(r#"{"id": 4, "beschreibung": "UV Keller"}"#).unwrap();
        assert_eq!(installation.fields, 3);
        assert_eq!(installation.rows, 7);
        assert_eq!(installation.code, "");
        assert_eq!(installation.grid_shape().max_columns(), 252);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let installation = Installation { id: 7, description: "  ".to_owned(), ..Installation::default() };
        assert_eq!(installation.display_name(), "Anlage 7");
    }

    #[test]
    fn legacy_store_is_migrated_and_typed() {
        let store = RecordStore::from_json(
            r#"{
                "kunden": {
                    "Müller GmbH": {
                        "id": 1,
                        "projekt": "Neubau Halle",
                        "plz": "12345",
                        "anlagen": [{"id": 3, "beschreibung": "HV", "felder": 2, "reihen": 4, "teile_text": "alt"}]
                    }
                },
                "next_kunden_id": 2,
                "next_anlage_id": 4
            }"#,
        )
        .unwrap();
        let customer = &store.customers["Müller GmbH"];
        assert_eq!(customer.name, "Müller GmbH");
        assert_eq!(customer.project, "Neubau Halle");
        assert_eq!(customer.zip, "12345");
        assert_eq!(customer.next_installation_id, 4);
        assert_eq!(customer.installations[0].fields, 2);
        assert_eq!(store.next_customer_id, 2);

        let written = store.to_json().unwrap();
        assert!(written.contains("\"schema_version\": 2"));
        assert!(!written.contains("teile_text"));
        assert_eq!(RecordStore::from_json(&written).unwrap(), store);
    }
}
