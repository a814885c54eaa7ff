use chrono::NaiveDate;
use chrono::NaiveDateTime;
use verteiler_export::package::inspect::inspect_package;
use verteiler_export::package::inspect::read_table_rows;
use verteiler_export::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 2).unwrap().and_hms_opt(14, 0, 59).unwrap()
}

fn installation() -> Installation {
    Installation {
        id: 2,
        description: "HV EG".to_owned(),
        fields: 1,
        rows: 2,
        label_text: "1-3 Licht;Flur\n10+5 Steckdosen\n\n20 Herd".to_owned(),
        ..Installation::default()
    }
}

fn manifest_paths(path: &std::path::Path) -> Vec<String> {
    let summary = inspect_package(path).unwrap();
    assert!(summary.mimetype_first_and_stored());
    assert!(summary.manifest_matches_entries());
    assert_eq!(summary.root_media_type(), Some(summary.mimetype.as_str()));
    summary.manifest.into_iter().map(|entry| entry.full_path).collect()
}

#[test]
fn ods_container_and_rows() {
    let base = tempfile::tempdir().unwrap();
    let settings = StyleSettings {
        watermark: Some("Entwurf".to_owned()),
        ..StyleSettings::default()
    };
    let path = export_installation_ods_at(Some(&installation()), &settings, base.path(), "Kunde/Nord", now()).unwrap();
    assert_eq!(path.file_name().unwrap(), "HV_EG_20241102_140059.ods");

    assert_eq!(inspect_package(&path).unwrap().mimetype, "application/vnd.oasis.opendocument.spreadsheet");
    assert_eq!(manifest_paths(&path), vec!["/", "content.xml", "styles.xml", "meta.xml"]);

    let rows = read_table_rows(&path).unwrap();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.width(), COLUMNS_PER_UNIT as usize);
        let mut index = 0;
        while index < row.cells.len() {
            let cell = &row.cells[index];
            assert!(!cell.covered, "covered cell without a spanning cell");
            let span = cell.spanned as usize;
            assert!(row.cells[index + 1..index + span].iter().all(|cell| cell.covered));
            index += span;
        }
    }

    let labels = rows[2].cells.iter().map(|cell| cell.text.as_str()).collect::<Vec<_>>();
    assert_eq!(labels.first(), Some(&"13"));
    assert_eq!(labels.last(), Some(&"24"));

    let content = &rows[1].cells;
    assert_eq!(content[0].text, "Licht\nFlur");
    assert_eq!(content[0].spanned, 3);
    assert_eq!(content[9].text, "Steckdosen");
    assert_eq!(content[9].spanned, 3);
    assert_eq!(rows[3].cells[7].text, "Herd");
}

#[test]
fn odt_container() {
    let base = tempfile::tempdir().unwrap();
    let customer = Customer {
        name: "Kunde Nord".to_owned(),
        installations: vec![installation()],
        ..Customer::default()
    };
    let path = export_customer_odt_at(Some(&customer), base.path(), now()).unwrap();

    assert_eq!(inspect_package(&path).unwrap().mimetype, "application/vnd.oasis.opendocument.text");
    assert_eq!(manifest_paths(&path), vec!["/", "content.xml", "meta.xml"]);
}

#[test]
fn no_valid_labels_writes_nothing() {
    let base = tempfile::tempdir().unwrap();
    let installation = Installation {
        label_text: "Heizung\n\n5-3 Licht".to_owned(),
        ..installation()
    };

    let error = export_installation_ods(Some(&installation), &StyleSettings::default(), base.path(), "Kunde").unwrap_err();
    assert!(error.is_invalid_input());
    assert!(matches!(error, ExportError::InvalidInput(InputError::NoValidLabels)));
    assert!(!base.path().join("Kunde").exists());
}

#[test]
fn stored_records_export() {
    let store = RecordStore::from_json(
        r#"{
            "kunden": {
                "Kunde Süd": {
                    "projekt": "Umbau",
                    "anlagen": [
                        { "id": 1, "beschreibung": "UV 1", "felder": 1, "reihen": 1, "text_inhalt": "1+11 Zähler" }
                    ]
                }
            }
        }"#,
    )
    .unwrap();
    let customer = store.customers.get("Kunde Süd").unwrap();
    assert_eq!(customer.name, "Kunde Süd");

    let base = tempfile::tempdir().unwrap();
    let path = export_installation_ods_at(
        customer.installations.first(),
        &StyleSettings::default(),
        base.path(),
        &customer.name,
        now(),
    )
    .unwrap();
    let rows = read_table_rows(&path).unwrap();
    assert_eq!(rows[1].cells[0].spanned, 12);
    assert_eq!(rows[1].cells[0].text, "Zähler");
}
