use gondola::error::ApiError;
use gondola::items::SortKey;
use gondola::tooling::cli::Commands;

use crate::support::{ids, names, Workspace, ENTEROS};

fn show(category: &str, filter: Option<&str>) -> Commands {
    Commands::Show {
        category: Some(category.to_string()),
        filter: filter.map(str::to_string),
        format: "json".to_string(),
    }
}

#[test]
fn add_assigns_next_id_and_normalizes_price() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche entera", "1.20", "10");
    let output = ws.add(ENTEROS, "Leche en polvo", "4,75", "3");
    assert!(output.contains("with ID 2"));

    let items = ws.items(ENTEROS);
    assert_eq!(ids(&items), vec!["1", "2"]);
    assert_eq!(items[1].price, "4.75");
}

#[test]
fn add_rejects_invalid_price_without_writing() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche entera", "1.20", "10");

    let result = ws.cli.execute(&Commands::Add {
        category: Some(ENTEROS.to_string()),
        name: Some("Crema".to_string()),
        price: Some("-3".to_string()),
        stock: Some("1".to_string()),
    });
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert_eq!(ws.items(ENTEROS).len(), 1);
}

#[test]
fn add_after_largest_valid_id_fails_cleanly() {
    let ws = Workspace::seeded();
    std::fs::write(
        ws.record_path(ENTEROS),
        "ID,Nombre,Precio,Stock\n18446744073709551615,Leche,1.20,10\n",
    )
    .unwrap();
    let report = ws.run_json(Commands::Verify {
        format: "json".to_string(),
    });
    assert_eq!(report["repaired_files"].as_array().unwrap().len(), 0);

    let result = ws.cli.execute(&Commands::Add {
        category: Some(ENTEROS.to_string()),
        name: Some("Crema".to_string()),
        price: Some("2".to_string()),
        stock: Some("1".to_string()),
    });
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert_eq!(ids(&ws.items(ENTEROS)), vec!["18446744073709551615"]);
}

#[test]
fn add_requires_all_fields_together() {
    let ws = Workspace::seeded();
    let result = ws.cli.execute(&Commands::Add {
        category: Some(ENTEROS.to_string()),
        name: Some("Crema".to_string()),
        price: None,
        stock: None,
    });
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn show_json_lists_items_and_filters_by_name() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche entera", "1.20", "10");
    ws.add(ENTEROS, "Queso", "3.00", "4");
    ws.add(ENTEROS, "LECHE chocolatada", "1.50", "6");

    let all = ws.run_json(show(ENTEROS, None));
    assert_eq!(all["total"], 3);
    assert_eq!(all["items"].as_array().unwrap().len(), 3);
    assert_eq!(all["items"][0]["Nombre"], "Leche entera");
    assert_eq!(all["category"], "Alimentos -> Lacteos -> Enteros");

    let filtered = ws.run_json(show(ENTEROS, Some("leche")));
    assert_eq!(filtered["total"], 3);
    let found: Vec<&str> = filtered["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["Nombre"].as_str().unwrap())
        .collect();
    assert_eq!(found, vec!["Leche entera", "LECHE chocolatada"]);
}

#[test]
fn category_lookup_ignores_case_and_accepts_arrows() {
    let ws = Workspace::seeded();
    ws.add("alimentos -> lacteos -> enteros", "Leche", "1", "1");
    assert_eq!(ws.items(ENTEROS).len(), 1);
}

#[test]
fn unknown_and_interior_categories_are_errors() {
    let ws = Workspace::seeded();
    let missing = ws.cli.execute(&show("Alimentos/Carnes", None));
    assert!(matches!(missing, Err(ApiError::CategoryNotFound(_))));

    let interior = ws.cli.execute(&show("Alimentos/Lacteos", None));
    assert!(matches!(interior, Err(ApiError::NotALeaf(_))));
}

#[test]
fn modify_changes_only_supplied_fields() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche", "1.20", "10");
    ws.add(ENTEROS, "Queso", "3.00", "4");

    ws.run(Commands::Modify {
        category: Some(ENTEROS.to_string()),
        id: Some("2".to_string()),
        name: None,
        price: Some("3,40".to_string()),
        stock: Some("  ".to_string()),
    });

    let items = ws.items(ENTEROS);
    assert_eq!(items[1].name, "Queso");
    assert_eq!(items[1].price, "3.40");
    assert_eq!(items[1].stock, "4");
    assert_eq!(items[0].price, "1.20");
}

#[test]
fn modify_unknown_id_is_item_not_found() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche", "1.20", "10");
    let result = ws.cli.execute(&Commands::Modify {
        category: Some(ENTEROS.to_string()),
        id: Some("9".to_string()),
        name: Some("Otro".to_string()),
        price: None,
        stock: None,
    });
    assert!(matches!(result, Err(ApiError::ItemNotFound(_))));
}

#[test]
fn delete_reindexes_remaining_items() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche", "1.20", "10");
    ws.add(ENTEROS, "Queso", "3.00", "4");
    ws.add(ENTEROS, "Yogur", "0.80", "6");

    let output = ws.run(Commands::Delete {
        category: Some(ENTEROS.to_string()),
        id: Some("2".to_string()),
        force: true,
    });
    assert!(output.contains("Queso"));

    let items = ws.items(ENTEROS);
    assert_eq!(ids(&items), vec!["1", "2"]);
    assert_eq!(names(&items), vec!["Leche", "Yogur"]);
}

#[test]
fn sort_without_save_leaves_file_alone() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Caro", "9.00", "1");
    ws.add(ENTEROS, "Barato", "1.00", "1");

    let output = ws.run(Commands::Sort {
        category: Some(ENTEROS.to_string()),
        by: SortKey::Price,
        descending: false,
        save: false,
    });
    let barato = output.find("Barato").unwrap();
    let caro = output.find("Caro").unwrap();
    assert!(barato < caro);
    assert_eq!(names(&ws.items(ENTEROS)), vec!["Caro", "Barato"]);
}

#[test]
fn saved_sort_rewrites_file_reindexed() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Medio", "2.00", "5");
    ws.add(ENTEROS, "Caro", "9.00", "1");
    ws.add(ENTEROS, "Barato", "1.00", "7");

    ws.run(Commands::Sort {
        category: Some(ENTEROS.to_string()),
        by: SortKey::Stock,
        descending: true,
        save: true,
    });

    let items = ws.items(ENTEROS);
    assert_eq!(names(&items), vec!["Barato", "Medio", "Caro"]);
    assert_eq!(ids(&items), vec!["1", "2", "3"]);
}

#[test]
fn average_of_leaf_and_whole_catalog() {
    let ws = Workspace::seeded();
    ws.add(ENTEROS, "Leche", "1.00", "2");
    ws.add(ENTEROS, "Queso", "3.00", "4");
    ws.add("Bebidas/Gaseosas/Zero", "Cola", "2.00", "9");

    let leaf = ws.run(Commands::Average {
        category: Some(ENTEROS.to_string()),
        all: false,
    });
    assert!(leaf.contains("Mean price: 2.00"));
    assert!(leaf.contains("Mean stock: 3.00"));

    let all = ws.run(Commands::Average {
        category: None,
        all: true,
    });
    assert!(all.contains("Files: 8"));
    assert!(all.contains("Mean price: 2.00"));
    assert!(all.contains("Mean stock: 5.00"));
}

#[test]
fn average_of_empty_leaf_reports_nothing_numeric() {
    let ws = Workspace::seeded();
    let output = ws.run(Commands::Average {
        category: Some(ENTEROS.to_string()),
        all: false,
    });
    assert!(output.contains("No numeric prices or stock"));
}
