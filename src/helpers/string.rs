//! String conversion utilities for file names and ODF length values.

use chrono::NaiveDateTime;

/// Characters that are not allowed in file names on the supported platforms.
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turns free text into a file name stem: trimmed, whitespace replaced by `_`,
/// path separators and reserved characters replaced by `_`.
pub(crate) fn sanitize_file_stem(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| if c.is_whitespace() || FORBIDDEN.contains(&c) || c.is_control() { '_' } else { c })
        .collect()
}

/// Turns a customer name into a single directory component.
/// Spaces are kept; separators and reserved characters are replaced by `_`.
pub(crate) fn sanitize_directory_name(text: &str) -> String {
    let name: String = text
        .trim()
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    match name.as_str() {
        "" | "." | ".." => "Unbekannt".to_owned(),
        _ => name,
    }
}

/// Timestamp suffix used in export file names, e.g. `20240131_154502`.
pub(crate) fn timestamp_suffix(now: &NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Formats a length in centimeters, e.g. `1.75cm`.
pub(crate) fn cm(value: f64) -> String {
    format!("{}cm", value)
}

/// Formats a font size in points, e.g. `7pt`.
pub(crate) fn pt(value: f64) -> String {
    format!("{}pt", value)
}
