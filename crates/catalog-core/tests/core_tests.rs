use std::fs;
use tempfile::TempDir;

use catalog_core::catalog::{read_catalog, read_csv, read_json};
use catalog_core::error::Error;
use catalog_core::types::Dimension;

const CSV: &str = "\
ID,SKU,Name,Short description,Weight (lbs),Length (in),Width (in),Categories,Supabase_ID,Unused column
1,200010,Shielded Motor Drop,4-conductor drop cable,608,12000,1.5,\"Cable, Motor\",2,x
2,170110,UF/NMC-B,,not-a-number,,0,Wire,3,y
";

#[test]
fn read_csv_by_column_name() {
    let rows = read_csv(CSV.as_bytes()).expect("read csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sku.as_deref(), Some("200010"));
    assert_eq!(rows[0].external_id.as_deref(), Some("2"));
    assert_eq!(rows[1].short_description, None, "empty cell reads as missing");

    let dims = rows[0].dimensions();
    assert_eq!(dims.get(Dimension::Weight), Some(608.0));
    assert_eq!(dims.get(Dimension::Width), Some(1.5));
    assert_eq!(dims.get(Dimension::Height), None, "column absent from the file");
}

#[test]
fn unparseable_measurements_become_absent_and_zero_survives() {
    let rows = read_csv(CSV.as_bytes()).expect("read csv");
    let dims = rows[1].dimensions();
    assert_eq!(dims.weight, None);
    assert_eq!(dims.length, None);
    assert_eq!(dims.width, Some(0.0));
}

#[test]
fn record_carries_search_text_and_categories() {
    let mut rows = read_csv(CSV.as_bytes()).expect("read csv");
    let row = rows.remove(0);
    let text = row.search_text();
    assert!(text.contains("Shielded Motor Drop"));
    assert!(text.contains("4-conductor"));
    let record = row.into_record(text.clone(), Default::default());
    assert_eq!(record.categories, vec!["Cable".to_string(), "Motor".to_string()]);
    assert_eq!(record.search_text, text);
    assert_eq!(record.name, "Shielded Motor Drop");
}

#[test]
fn missing_identifier_columns_are_fatal() {
    let err = read_csv("Name,Description\nCable,Copper\n".as_bytes()).unwrap_err();
    match err {
        Error::MissingColumns(cols) => assert_eq!(cols, vec!["ID".to_string(), "SKU".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ragged_csv_is_fatal() {
    let err = read_csv("ID,SKU,Name\n1,2,3,4\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::Csv(_)));
}

#[test]
fn unreadable_source_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = read_catalog(&tmp.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, Error::Unreadable { .. }));
}

#[test]
fn json_rows_accept_numeric_cells() {
    let json = r#"[
        {"ID": 1, "SKU": "230025", "Name": "Quadruplex Aluminum Cable", "Weight (lbs)": 42.5, "In stock?": 1},
        {"ID": 2, "SKU": "200010", "Name": "Shielded Motor Drop Cable", "Weight (lbs)": null, "Categories": ["Cable", "Motor"]}
    ]"#;
    let rows = read_json(json.as_bytes()).expect("read json");
    assert_eq!(rows[0].id.as_deref(), Some("1"));
    assert_eq!(rows[0].dimensions().weight, Some(42.5));
    assert_eq!(rows[1].weight, None);
    assert_eq!(rows[1].categories.as_deref(), Some("Cable, Motor"));
}

#[test]
fn json_row_without_sku_is_fatal() {
    let json = r#"[
        {"ID": "1", "SKU": "230025", "Name": "Quadruplex Aluminum Cable"},
        {"ID": "2", "Name": "Shielded Motor Drop Cable"}
    ]"#;
    match read_json(json.as_bytes()).unwrap_err() {
        Error::MissingColumns(cols) => assert_eq!(cols, vec!["SKU".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_catalog_dispatches_on_extension() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("data.csv");
    fs::write(&csv_path, CSV).unwrap();
    assert_eq!(read_catalog(&csv_path).expect("csv").len(), 2);

    let json_path = tmp.path().join("data.json");
    fs::write(&json_path, r#"[{"ID": "1", "SKU": "9"}]"#).unwrap();
    assert_eq!(read_catalog(&json_path).expect("json").len(), 1);
}
