use std::fs;

use gondola::tooling::cli::Commands;

use crate::support::{ids, names, Workspace, ENTEROS};

fn verify_json(ws: &Workspace) -> serde_json::Value {
    ws.run_json(Commands::Verify {
        format: "json".to_string(),
    })
}

fn len(value: &serde_json::Value) -> usize {
    value.as_array().map(Vec::len).unwrap_or(0)
}

#[test]
fn first_verify_seeds_default_hierarchy() {
    let ws = Workspace::empty();
    let report = verify_json(&ws);
    assert_eq!(report["seeded"], true);
    assert_eq!(len(&report["created_files"]), 8);
    assert!(ws.record_path(ENTEROS).is_file());
    assert!(ws.record_path("Bebidas/Jugos/Naturales").is_file());

    let header = fs::read_to_string(ws.record_path(ENTEROS)).unwrap();
    assert_eq!(header.trim_end(), "ID,Nombre,Precio,Stock");
}

#[test]
fn second_verify_is_noop() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche", "1.20", "10");

    let report = verify_json(&ws);
    assert_eq!(report["seeded"], false);
    assert_eq!(len(&report["created_dirs"]), 0);
    assert_eq!(len(&report["created_files"]), 0);
    assert_eq!(len(&report["reset_files"]), 0);
    assert_eq!(len(&report["repaired_files"]), 0);
    assert_eq!(report["audited_files"], 8);

    let text = ws.run(Commands::Verify {
        format: "text".to_string(),
    });
    assert!(text.contains("Structure is up to date"));
}

#[test]
fn populated_catalog_without_template_is_only_audited() {
    let ws = Workspace::seeded();
    fs::remove_dir_all(ws.cli.base_path().join("Bebidas/Gaseosas")).unwrap();

    let report = verify_json(&ws);
    assert_eq!(report["seeded"], false);
    assert_eq!(len(&report["created_files"]), 0);
    assert_eq!(report["audited_files"], 6);
}

#[test]
fn header_mismatch_resets_file_to_schema() {
    let ws = Workspace::seeded();
    fs::write(ws.record_path(ENTEROS), "ID,Nombre\n1,Leche\n").unwrap();

    let report = verify_json(&ws);
    assert_eq!(len(&report["reset_files"]), 1);
    assert_eq!(report["reset_files"][0]["found_header"][1], "Nombre");

    let content = fs::read_to_string(ws.record_path(ENTEROS)).unwrap();
    assert_eq!(content.trim_end(), "ID,Nombre,Precio,Stock");
}

#[test]
fn malformed_rows_are_dropped_and_rest_reindexed() {
    let ws = Workspace::seeded();
    fs::write(
        ws.record_path(ENTEROS),
        "ID,Nombre,Precio,Stock\n1,Leche,1.20,10\n2,Queso,3.00,-5\n3,Yogur,0.80,4\n",
    )
    .unwrap();

    let report = verify_json(&ws);
    assert_eq!(len(&report["repaired_files"]), 1);
    assert_eq!(report["repaired_files"][0]["kept"], 2);
    assert_eq!(len(&report["repaired_files"][0]["dropped"]), 1);

    let items = ws.items(ENTEROS);
    assert_eq!(ids(&items), vec!["1", "2"]);
    assert_eq!(names(&items), vec!["Leche", "Yogur"]);
}

#[test]
fn tree_json_mirrors_directories() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche", "1.20", "10");

    let tree = ws.run_json(Commands::Tree {
        format: "json".to_string(),
    });
    let enteros = &tree["categories"]["Alimentos"]["Lacteos"]["Enteros"];
    assert_eq!(enteros["items"][0]["Nombre"], "Leche");
    assert!(tree["categories"]["Bebidas"]["Jugos"]["Naturales"]["items"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn unknown_format_is_rejected() {
    let ws = Workspace::seeded();
    let result = ws.cli.execute(&Commands::Tree {
        format: "yaml".to_string(),
    });
    assert!(result.is_err());
}
