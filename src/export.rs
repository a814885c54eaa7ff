//! Caller-facing export operations.
//!
//! Both exports write below `<base>/<customer name>/` and return the path of the new
//! file. Input problems are reported as [`InputError`] before anything is written.

use crate::document::build_customer_document;
use crate::document::build_spreadsheet;
use crate::document::build_styles;
use crate::error::ExportError;
use crate::error::InputError;
use crate::error::ResultMessage;
use crate::grid::validate;
use crate::helpers::string::sanitize_directory_name;
use crate::helpers::string::sanitize_file_stem;
use crate::helpers::string::timestamp_suffix;
use crate::package::meta_document;
use crate::package::DocumentKind;
use crate::package::Package;
use crate::records::Customer;
use crate::records::Installation;
use crate::settings::StyleSettings;
use chrono::Local;
use chrono::NaiveDateTime;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;

/// Exports the label sheet of one installation as `.ods`.
///
/// # Arguments
/// * `installation` - Installation to export; `None` is reported as a missing record
/// * `settings` - Formatting settings
/// * `base` - Export base directory
/// * `customer_name` - Owning customer, names the output subdirectory
///
/// # Returns
/// * `Result<PathBuf, ExportError>` - Path of the written file or error
pub fn export_installation_ods(
    installation: Option<&Installation>,
    settings: &StyleSettings,
    base: &Path,
    customer_name: &str,
) -> Result<PathBuf, ExportError> {
    export_installation_ods_at(installation, settings, base, customer_name, Local::now().naive_local())
}

/// [`export_installation_ods`] with an explicit export time.
pub fn export_installation_ods_at(
    installation: Option<&Installation>,
    settings: &StyleSettings,
    base: &Path,
    customer_name: &str,
    now: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let installation = installation.ok_or(InputError::MissingRecord)?;
    let shape = installation.grid_shape();
    let validation = validate(&installation.label_text, shape);
    if validation.placements.is_empty() {
        Err(InputError::NoValidLabels)?;
    }
    if !validation.is_valid() {
        Err(InputError::InvalidLabels {
            error_count: validation.error_count(),
        })?;
    }

    let styles = build_styles(settings);
    let sheet = build_spreadsheet(&installation.display_name(), shape, &validation.placements, &settings.line_break);

    let mut package = Package::new(DocumentKind::Spreadsheet);
    package.add_xml("content.xml", &sheet.content_document(&styles)).with_prefix("content.xml")?;
    package.add_xml("styles.xml", &styles.styles_document()).with_prefix("styles.xml")?;
    package.add_xml("meta.xml", &meta_document(now)).with_prefix("meta.xml")?;

    let path = customer_directory(base, customer_name).join(format!(
        "{}_{}.{}",
        installation_file_stem(installation, customer_name),
        timestamp_suffix(&now),
        DocumentKind::Spreadsheet.extension()
    ));
    package.write_to(&path)?;

    info!(
        path = %path.display(),
        kind = "ods",
        placements = validation.placements.len(),
        units = shape.units(),
        "installation exported"
    );
    Ok(path)
}

/// Exports a customer with all installations as `.odt`.
///
/// # Arguments
/// * `customer` - Customer to export; `None` is reported as a missing record
/// * `base` - Export base directory
///
/// # Returns
/// * `Result<PathBuf, ExportError>` - Path of the written file or error
pub fn export_customer_odt(customer: Option<&Customer>, base: &Path) -> Result<PathBuf, ExportError> {
    export_customer_odt_at(customer, base, Local::now().naive_local())
}

/// [`export_customer_odt`] with an explicit export time.
pub fn export_customer_odt_at(customer: Option<&Customer>, base: &Path, now: NaiveDateTime) -> Result<PathBuf, ExportError> {
    let customer = customer.ok_or(InputError::MissingRecord)?;

    let mut package = Package::new(DocumentKind::Text);
    package
        .add_xml("content.xml", &build_customer_document(customer))
        .with_prefix("content.xml")?;
    package.add_xml("meta.xml", &meta_document(now)).with_prefix("meta.xml")?;

    let path = customer_directory(base, &customer.name).join(format!(
        "Kunde_{}_{}.{}",
        sanitize_file_stem(&customer.name),
        timestamp_suffix(&now),
        DocumentKind::Text.extension()
    ));
    package.write_to(&path)?;

    info!(
        path = %path.display(),
        kind = "odt",
        installations = customer.installations.len(),
        "customer exported"
    );
    Ok(path)
}

fn customer_directory(base: &Path, customer_name: &str) -> PathBuf {
    base.join(sanitize_directory_name(customer_name))
}

/// Description, or `Kunde_<name>_Anlage_<id>` when the installation has none.
fn installation_file_stem(installation: &Installation, customer_name: &str) -> String {
    match sanitize_file_stem(&installation.description) {
        stem if stem.is_empty() => format!("Kunde_{}_Anlage_{}", sanitize_file_stem(customer_name), installation.id),
        stem => stem,
    }
}
