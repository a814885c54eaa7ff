//! Versioned schema migration of the customer data file.
//!
//! Each step upgrades the raw JSON document by exactly one version. Documents without
//! a `schema_version` key are version 0.

use serde_json::Map;
use serde_json::Value;
use tracing::debug;

pub const CURRENT_SCHEMA_VERSION: u64 = 2;

const SCHEMA_VERSION_KEY: &str = "schema_version";

type Step = fn(&mut Map<String, Value>);

/// Migration steps; `STEPS[n]` upgrades version `n` to `n + 1`.
const STEPS: [(&str, Step); 2] = [
    ("add_next_installation_id", add_next_installation_id),
    ("strip_split_label_fields", strip_split_label_fields),
];

/// Schema version stored in a data document.
pub fn schema_version(document: &Value) -> u64 {
    document.get(SCHEMA_VERSION_KEY).and_then(Value::as_u64).unwrap_or(0)
}

/// Upgrades a data document to [`CURRENT_SCHEMA_VERSION`]. Running it on an already
/// current document changes nothing. Non-object documents are returned untouched.
pub fn migrate(mut document: Value) -> Value {
    let version = schema_version(&document);
    if let Some(root) = document.as_object_mut() {
        for (index, (name, step)) in STEPS.iter().enumerate() {
            if (index as u64) < version {
                continue;
            }
            debug!(step = *name, from = index, "migrating data file");
            step(root);
        }
        root.insert(SCHEMA_VERSION_KEY.to_owned(), Value::from(CURRENT_SCHEMA_VERSION.max(version)));
    }
    document
}

fn customers_mut(root: &mut Map<String, Value>) -> impl Iterator<Item = &mut Map<String, Value>> {
    root.get_mut("kunden")
        .and_then(Value::as_object_mut)
        .into_iter()
        .flat_map(|customers| customers.values_mut())
        .filter_map(Value::as_object_mut)
}

fn installations_mut(customer: &mut Map<String, Value>) -> impl Iterator<Item = &mut Map<String, Value>> {
    customer
        .get_mut("anlagen")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flat_map(|installations| installations.iter_mut())
        .filter_map(Value::as_object_mut)
}

/// Installation ids moved from one global counter to a counter per customer.
/// Each customer without one continues after its highest installation id.
fn add_next_installation_id(root: &mut Map<String, Value>) {
    root.remove("next_anlage_id");
    for customer in customers_mut(root) {
        if customer.contains_key("next_anlage_id") {
            continue;
        }
        let max_id = installations_mut(customer)
            .filter_map(|installation| installation.get("id").and_then(Value::as_u64))
            .max()
            .unwrap_or(0);
        customer.insert("next_anlage_id".to_owned(), Value::from(max_id + 1));
    }
}

/// The split label editor was removed; its text and parse cache are dropped.
fn strip_split_label_fields(root: &mut Map<String, Value>) {
    for customer in customers_mut(root) {
        for installation in installations_mut(customer) {
            installation.remove("teile_text");
            installation.remove("teile_parsed");
        }
    }
}
