use gondola::tooling::cli::Commands;

use crate::support::Workspace;

fn navigate(ws: &Workspace, choices: &str) -> Result<String, gondola::error::ApiError> {
    ws.cli.execute(&Commands::Navigate {
        choices: Some(choices.to_string()),
    })
}

#[test]
fn choosing_a_leaf_prints_its_record_file() {
    let ws = Workspace::seeded();
    // Alimentos -> Lacteos -> Enteros
    let output = navigate(&ws, "1,2,2").unwrap();
    assert!(output.ends_with("productos.csv"));
    assert!(output.contains("Enteros"));
}

#[test]
fn back_returns_to_parent_level() {
    let ws = Workspace::seeded();
    // Alimentos -> Lacteos, back, Cereales -> Avena
    let output = navigate(&ws, "1,2,0,1,1").unwrap();
    assert!(output.contains("Cereales"));
    assert!(output.contains("Avena"));
}

#[test]
fn invalid_answers_are_skipped() {
    let ws = Workspace::seeded();
    let output = navigate(&ws, "abc,7,2,2,1").unwrap();
    // Bebidas -> Jugos -> Artificiales
    assert!(output.contains("Artificiales"));
}

#[test]
fn back_at_top_level_exits() {
    let ws = Workspace::seeded();
    assert_eq!(navigate(&ws, "0").unwrap(), "No category selected");
}

#[test]
fn running_out_of_choices_is_an_error() {
    let ws = Workspace::seeded();
    assert!(navigate(&ws, "1").is_err());
}
