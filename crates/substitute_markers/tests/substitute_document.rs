// crates/substitute_markers/tests/substitute_document.rs

use document_model::{MemoryDocument, TemplateDocument};
use scan_markers::scan;
use substitute_markers::{raw_replace, substitute, Substitutions};

fn contract() -> MemoryDocument {
    MemoryDocument::new()
        .with_paragraph("Olá {{NOME}}, bem-vindo [NOME] e <<NOME>> e {NOME}!")
        .with_paragraph("Data: {{DATA}}")
        .with_table(vec![vec!["Cargo", "[CARGO]"], vec!["Empresa", "<<EMPRESA>>"]])
        .with_section(Some(vec!["{{EMPRESA}} - confidencial"]), Some(vec!["Assinado por {NOME}"]))
}

fn all_text(doc: &MemoryDocument) -> Vec<String> {
    doc.regions()
        .unwrap()
        .iter()
        .map(|id| doc.region_text(id).unwrap())
        .collect()
}

#[test]
fn test_full_mapping_empties_the_marker_set() {
    let mut doc = contract();
    let subs = Substitutions::from_json(
        r#"{"NOME": "João", "DATA": "22/07/2025", "CARGO": "Diretor", "EMPRESA": "Minha Empresa"}"#,
    )
    .unwrap();

    let count = substitute(&mut doc, &subs).unwrap();

    assert!(count >= 4);
    assert!(scan(&doc).unwrap().is_empty());
    assert_eq!(doc.paragraphs[0], "Olá João, bem-vindo João e João e João!");
    assert_eq!(doc.sections[0].header.as_ref().unwrap()[0], "Minha Empresa - confidencial");
    assert_eq!(doc.sections[0].footer.as_ref().unwrap()[0], "Assinado por João");
}

#[test]
fn test_second_identical_call_is_a_noop() {
    let mut doc = contract();
    let subs = Substitutions::try_from(vec![("NOME", "João"), ("CARGO", "Diretor")]).unwrap();

    assert!(substitute(&mut doc, &subs).unwrap() > 0);
    let after_first = all_text(&doc);

    assert_eq!(substitute(&mut doc, &subs).unwrap(), 0);
    assert_eq!(all_text(&doc), after_first);
}

#[test]
fn test_absent_keys_do_not_change_the_count() {
    let mut with_extra = contract();
    let mut without_extra = contract();

    let base = Substitutions::try_from(vec![("DATA", "hoje")]).unwrap();
    let extra = Substitutions::try_from(vec![("DATA", "hoje"), ("INEXISTENTE", "x")]).unwrap();

    let a = substitute(&mut without_extra, &base).unwrap();
    let b = substitute(&mut with_extra, &extra).unwrap();
    assert_eq!(a, b);
    assert_eq!(all_text(&with_extra), all_text(&without_extra));
}

#[test]
fn test_partial_mapping_leaves_other_markers_verbatim() {
    let mut doc = contract();
    let subs = Substitutions::try_from(vec![("DATA", "hoje")]).unwrap();
    substitute(&mut doc, &subs).unwrap();

    assert_eq!(doc.paragraphs[1], "Data: hoje");
    assert_eq!(doc.paragraphs[0], "Olá {{NOME}}, bem-vindo [NOME] e <<NOME>> e {NOME}!");
    assert_eq!(doc.tables[0].rows[0][1], "[CARGO]");
    assert_eq!(scan(&doc).unwrap(), vec!["CARGO", "EMPRESA", "NOME"]);
}

/// Every name the scanner reports is replaced by the substitutor.
#[test]
fn test_scanned_markers_are_all_substitutable() {
    let mut doc = MemoryDocument::new()
        .with_paragraph("{{ ESPACO }} e {{{ANINHADO}}} e [[DUPLO]]")
        .with_table(vec![vec!["<<<ANGULO>>>", "{a{b}"]]);

    let found = scan(&doc).unwrap();
    assert!(!found.is_empty());

    let subs = Substitutions::try_from(
        found
            .iter()
            .map(|name| (name.clone(), "ok".to_string()))
            .collect::<Vec<_>>(),
    )
    .unwrap();
    substitute(&mut doc, &subs).unwrap();

    for name in found {
        assert!(
            !scan(&doc).unwrap().contains(&name),
            "marker {} survived substitution",
            name
        );
    }
}

#[test]
fn test_raw_replace_in_table_cells_only() {
    let mut doc = MemoryDocument::new()
        .with_paragraph("sem nada")
        .with_table(vec![vec!["abc", "outro"], vec!["x abc y abc", "fim"]]);

    let hits = raw_replace(&mut doc, "abc", "xyz").unwrap();

    assert_eq!(hits, 2);
    assert_eq!(doc.tables[0].rows[0][0], "xyz");
    assert_eq!(doc.tables[0].rows[1][0], "x xyz y xyz");
    assert!(all_text(&doc).iter().all(|text| !text.contains("abc")));
}

#[test]
fn test_raw_replace_ignores_marker_syntax() {
    let mut doc = MemoryDocument::new().with_paragraph("{{NOME}} e [NOME]");
    assert_eq!(raw_replace(&mut doc, "NOME", "X").unwrap(), 1);
    assert_eq!(doc.paragraphs[0], "{{X}} e [X]");
}
