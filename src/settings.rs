//! Formatting settings consumed by the document builders.
//!
//! Settings are stored as a flat JSON object with the historic German key names.
//! Loading is lenient: unknown keys are ignored and a value of the wrong type falls
//! back to its default instead of failing the whole file.

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Flat record of formatting knobs for the ODS export.
/// Lengths are in centimeters, font sizes in points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    #[serde(rename = "default_felder")]
    pub default_fields: u32,
    #[serde(rename = "default_reihen")]
    pub default_rows: u32,
    #[serde(rename = "fontsize_gemergte_zelle")]
    pub merged_font_size: f64,
    #[serde(rename = "fontsize_beschriftung_zelle")]
    pub label_font_size: f64,
    #[serde(rename = "fontsize_inhalt_zelle")]
    pub content_font_size: f64,
    #[serde(rename = "spalten_breite")]
    pub column_width: f64,
    #[serde(rename = "beschriftung_row_hoehe")]
    pub label_row_height: f64,
    #[serde(rename = "inhalt_row_hoehe")]
    pub content_row_height: f64,
    #[serde(rename = "zellen_umrandung")]
    pub cell_border: bool,
    /// Splits a description into several lines inside its cell.
    #[serde(rename = "linebreak_char")]
    pub line_break: String,
    #[serde(rename = "seite_breite")]
    pub page_width: f64,
    #[serde(rename = "seite_hoehe")]
    pub page_height: f64,
    #[serde(rename = "rand_oben")]
    pub margin_top: f64,
    #[serde(rename = "rand_unten")]
    pub margin_bottom: f64,
    #[serde(rename = "rand_links")]
    pub margin_left: f64,
    #[serde(rename = "rand_rechts")]
    pub margin_right: f64,
    /// Watermark text; no watermark when absent or blank.
    #[serde(rename = "wasserzeichen")]
    pub watermark: Option<String>,
}

impl Default for StyleSettings {
    /// A4 landscape with the standard label layout.
    fn default() -> Self {
        StyleSettings {
            default_fields: 3,
            default_rows: 7,
            merged_font_size: 7.0,
            label_font_size: 7.0,
            content_font_size: 6.0,
            column_width: 1.75,
            label_row_height: 0.5,
            content_row_height: 1.5,
            cell_border: true,
            line_break: ";".to_owned(),
            page_width: 29.7,
            page_height: 21.0,
            margin_top: 2.0,
            margin_bottom: 1.5,
            margin_left: 1.0,
            margin_right: 1.0,
            watermark: None,
        }
    }
}

impl StyleSettings {
    /// Maximum length of the line break marker.
    pub const MAX_LINE_BREAK_CHARS: usize = 3;

    /// Loads settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(StyleSettings::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid settings file '{}'", path.display()))
    }

    /// Parses settings JSON, coercing every known key to the type of its default.
    pub fn from_json(text: &str) -> Result<Self> {
        let loaded: Map<String, Value> = serde_json::from_str(text).context("Settings must be a JSON object")?;
        let mut merged = match serde_json::to_value(StyleSettings::default())? {
            Value::Object(defaults) => defaults,
            _ => Map::new(),
        };
        for (key, value) in loaded {
            let Some(default) = merged.get(&key) else {
                continue;
            };
            match coerce(&value, default) {
                Some(value) => {
                    merged.insert(key, value);
                }
                None => warn!(key = %key, value = %value, "invalid settings value, keeping default"),
            }
        }
        let mut settings: StyleSettings = serde_json::from_value(Value::Object(merged))?;
        if settings.line_break.chars().count() > Self::MAX_LINE_BREAK_CHARS {
            warn!(line_break = %settings.line_break, "line break marker too long, keeping default");
            settings.line_break = StyleSettings::default().line_break;
        }
        Ok(settings)
    }

    /// Writes the settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("Failed to write settings file '{}'", path.display()))
    }

    /// Watermark text if one is configured.
    pub fn watermark_text(&self) -> Option<&str> {
        self.watermark.as_deref().map(str::trim).filter(|text| !text.is_empty())
    }
}

/// Converts `value` to the JSON type of `default`, `None` if impossible.
fn coerce(value: &Value, default: &Value) -> Option<Value> {
    match default {
        Value::Bool(_) => match value {
            Value::Bool(flag) => Some(Value::Bool(*flag)),
            Value::Number(number) => Some(Value::Bool(number.as_f64() != Some(0.0))),
            Value::String(text) => match text.trim().to_lowercase().as_str() {
                "true" | "1" | "ja" | "yes" | "on" => Some(Value::Bool(true)),
                "false" | "0" | "nein" | "no" | "off" | "" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        // Integer settings are all `u32`.
        Value::Number(number) if number.is_u64() => {
            let integer = match value {
                Value::Number(number) if number.is_f64() => number
                    .as_f64()
                    .filter(|float| (0.0..=u32::MAX as f64).contains(float))
                    .map(|float| float as u32),
                Value::Number(number) => number.as_u64().and_then(|integer| u32::try_from(integer).ok()),
                Value::String(text) => text.trim().parse::<u32>().ok(),
                _ => None,
            }?;
            Some(Value::Number(integer.into()))
        }
        Value::Number(_) => {
            let float = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
                _ => None,
            }?;
            Number::from_f64(float).map(Value::Number)
        }
        Value::String(_) => match value {
            Value::String(text) => Some(Value::String(text.to_owned())),
            Value::Number(number) => Some(Value::String(number.to_string())),
            Value::Bool(flag) => Some(Value::String(flag.to_string())),
            _ => None,
        },
        // Optional text settings.
        Value::Null => match value {
            Value::Null | Value::String(_) => Some(value.clone()),
            _ => None,
        },
        _ => None,
    }
}
