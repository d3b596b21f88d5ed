// crates/document_model/tests/load_save.rs

use document_model::{DocumentFormat, MemoryDocument, RegionId, TemplateDocument};
use std::fs;
use tempfile::tempdir;

/// A JSON document written to disk comes back with the same regions, and an
/// edit made through the trait survives a save.
#[test]
fn test_json_document_survives_disk_and_edit() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("contrato.json");
    fs::write(
        &path,
        r#"{
            "paragraphs": ["Contratante: {{NOME}}"],
            "tables": [{ "rows": [["Cargo", "[CARGO]"]] }],
            "sections": [{ "header": ["<<EMPRESA>>"], "footer": ["Página {PAGINA}"] }]
        }"#,
    )
    .expect("Failed to write document");

    let format = DocumentFormat::from_path(&path);
    assert_eq!(format, DocumentFormat::Json);

    let bytes = fs::read(&path).unwrap();
    let mut doc = format.load(&bytes).unwrap();
    assert_eq!(doc.regions().unwrap().len(), 5);

    let cell = RegionId::TableCell { table: 0, row: 0, cell: 1 };
    doc.set_region_text(&cell, "Diretor".to_string()).unwrap();
    fs::write(&path, format.save(&doc).unwrap()).unwrap();

    let reloaded = format.load(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(reloaded.region_text(&cell).unwrap(), "Diretor");
    assert_eq!(reloaded, doc);
}

/// Saving a JSON-shaped document as text keeps every region, one per line.
#[test]
fn test_text_save_keeps_every_region() {
    let doc = MemoryDocument::new()
        .with_paragraph("Olá {{NOME}}")
        .with_table(vec![vec!["[CARGO]"]])
        .with_section(None, Some(vec!["{PAGINA}"]));

    let text = String::from_utf8(DocumentFormat::Text.save(&doc).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Olá {{NOME}}", "[CARGO]", "{PAGINA}"]);
}
