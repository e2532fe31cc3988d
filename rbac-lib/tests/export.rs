//! Integration tests for exporting a table's selection.

use std::sync::Arc;

use rbac_lib::api::MemoryEndpoint;
use rbac_lib::config::TableConfig;
use rbac_lib::error::ExportError;
use rbac_lib::export::DirectorySink;
use rbac_lib::export::ExportTarget;
use rbac_lib::export::IdentityFormatter;
use rbac_lib::export::MemorySink;
use rbac_lib::model::Record;
use rbac_lib::model::RecordId;
use rbac_lib::presets;
use rbac_lib::render::Column;
use rbac_lib::render::Columns;
use rbac_lib::table::DataTable;
use rbac_lib::table::NoticeLevel;

async fn loaded_table(records: Vec<Record>) -> DataTable {
    let columns = Columns::new([Column::new("name", "Name")]).unwrap();
    let table = DataTable::new(Arc::new(MemoryEndpoint::new(records)), columns, TableConfig::default());
    assert!(table.fetch().await.is_loaded());
    table
}

fn two_records() -> Vec<Record> {
    // Same created_at, so the default order falls back to id descending.
    vec![
        Record::new().set("id", 1).set("name", "A"),
        Record::new().set("id", 2).set("name", "B"),
    ]
}

#[tokio::test]
async fn test_empty_selection_never_writes() {
    let table = loaded_table(two_records()).await;
    let mut sink = MemorySink::new();

    for target in ExportTarget::ALL {
        let result = table.export(target, &IdentityFormatter, "users", &mut sink);
        assert!(matches!(result, Err(ExportError::EmptySelection)));
        let notices = table.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "No data selected");
    }
    assert!(sink.files().is_empty());
    assert!(sink.clipboard().is_none());
}

#[tokio::test]
async fn test_csv_of_selection_preserves_key_order() {
    let table = loaded_table(two_records()).await;
    table.toggle_all_page(true);

    let mut sink = MemorySink::new();
    table
        .export(ExportTarget::Csv, &IdentityFormatter, "users", &mut sink)
        .unwrap();

    let file = sink.file("users.csv").unwrap();
    assert_eq!(file.mime, "text/csv");
    let text = String::from_utf8(file.bytes.clone()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines, ["id,name", "2,B", "1,A"]);
}

#[tokio::test]
async fn test_selection_is_exported_in_row_order() {
    let records = (1..=5).map(|i| Record::new().set("id", i).set("name", format!("R{}", i))).collect();
    let table = loaded_table(records).await;
    table.toggle_row(&RecordId::Int(1));
    table.toggle_row(&RecordId::Int(4));

    let mut sink = MemorySink::new();
    table
        .export(ExportTarget::Copy, &IdentityFormatter, "roles", &mut sink)
        .unwrap();

    let copied: serde_json::Value = serde_json::from_str(sink.clipboard().unwrap()).unwrap();
    let ids: Vec<_> = copied.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [4, 1]);
    let notices = table.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Data copied");
}

#[tokio::test]
async fn test_export_does_not_touch_state() {
    let table = loaded_table(two_records()).await;
    table.toggle_row(&RecordId::Int(2));
    let before = table.snapshot();

    let mut sink = MemorySink::new();
    table
        .export(ExportTarget::Spreadsheet, &IdentityFormatter, "users", &mut sink)
        .unwrap();

    let after = table.snapshot();
    assert_eq!(before.rows, after.rows);
    assert_eq!(before.selection, after.selection);
    assert_eq!(before.pagination, after.pagination);
}

#[tokio::test]
async fn test_directory_sink_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = (1..=3)
        .map(|i| {
            Record::new()
                .set("id", i)
                .set("name", format!("User {}", i))
                .set("email", format!("u{}@example.com", i))
                .set("created_at", "2024-01-01T00:00:00.000000Z")
                .set("updated_at", "2024-01-01T00:00:00.000000Z")
        })
        .collect();

    let preset = presets::users();
    let (table, parts) = preset.into_table(Arc::new(MemoryEndpoint::new(records)), TableConfig::default());
    table.fetch().await;
    table.toggle_all_page(true);

    let mut sink = DirectorySink::new(dir.path().join("exports"));
    for target in [ExportTarget::Pdf, ExportTarget::Spreadsheet, ExportTarget::Csv] {
        table
            .export(target, parts.formatter.as_ref(), parts.resource.name(), &mut sink)
            .unwrap();
    }

    let pdf = std::fs::read(dir.path().join("exports/users.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    let xlsx = std::fs::read(dir.path().join("exports/users.xlsx")).unwrap();
    assert!(xlsx.starts_with(b"PK"));
    let csv = std::fs::read_to_string(dir.path().join("exports/users.csv")).unwrap();
    assert_eq!(csv.lines().next(), Some("No,Name,Email,Created At,Updated At"));
    assert_eq!(csv.lines().count(), 4);
    assert_eq!(sink.written().len(), 3);
}
