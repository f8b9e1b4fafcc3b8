use std::fs;
use std::path::Path;

use gondola::error::ApiError;
use gondola::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

const TIENDA_CONFIG: &str = r#"
[catalog]
base_path = "Tienda"
mixed_categories = "reject"

[catalog.template.limpieza]
hogar = ["pisos", "vidrios"]
"#;

fn context_with(config: &str) -> (TempDir, CliContext) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("gondola.toml"), config).unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    (temp, cli)
}

fn verify(cli: &CliContext) -> serde_json::Value {
    let output = cli
        .execute(&Commands::Verify {
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

fn leaf(base: &Path, name: &str) -> std::path::PathBuf {
    base.join("limpieza").join("hogar").join(name).join("productos.csv")
}

#[test]
fn workspace_file_sets_base_path_and_template() {
    let (_temp, cli) = context_with(TIENDA_CONFIG);
    assert!(cli.base_path().ends_with("Tienda"));

    let report = verify(&cli);
    assert_eq!(report["seeded"], false);
    assert_eq!(report["created_files"].as_array().unwrap().len(), 2);
    assert!(leaf(&cli.base_path(), "pisos").is_file());
    assert!(leaf(&cli.base_path(), "vidrios").is_file());
}

#[test]
fn template_category_names_keep_their_case() {
    let (_temp, cli) = context_with(
        "[catalog]\nbase_path = \"Tienda\"\n\n[catalog.template.Alimentos]\nLacteos = [\"Enteros\", \"Deslactosados\"]\n",
    );
    let report = verify(&cli);
    assert_eq!(report["expected_leaves"], 2);

    let base = cli.base_path();
    assert!(base.join("Alimentos/Lacteos/Enteros/productos.csv").is_file());
    assert!(base.join("Alimentos/Lacteos/Deslactosados/productos.csv").is_file());
    let top: Vec<String> = fs::read_dir(&base)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(top, vec!["Alimentos"]);

    let rendered = cli.execute(&Commands::Config).unwrap();
    assert!(rendered.contains("Alimentos"), "{rendered}");
}

#[test]
fn configured_template_restores_deleted_leaf() {
    let (_temp, cli) = context_with(TIENDA_CONFIG);
    verify(&cli);
    fs::remove_dir_all(cli.base_path().join("limpieza/hogar/vidrios")).unwrap();

    let report = verify(&cli);
    assert_eq!(report["created_files"].as_array().unwrap().len(), 1);
    assert!(leaf(&cli.base_path(), "vidrios").is_file());
}

#[test]
fn reject_policy_fails_on_mixed_directory() {
    let (_temp, cli) = context_with(TIENDA_CONFIG);
    verify(&cli);
    fs::create_dir(cli.base_path().join("limpieza/hogar/pisos/extra")).unwrap();

    let result = cli.execute(&Commands::Tree {
        format: "text".to_string(),
    });
    assert!(matches!(result, Err(ApiError::MixedCategory(_))));
}

#[test]
fn default_policy_prefers_record_file() {
    let (_temp, cli) = context_with("[catalog]\nbase_path = \"Tienda\"\n");
    verify(&cli);
    let mixed = cli.base_path().join("Alimentos/Lacteos/Enteros");
    fs::create_dir(mixed.join("Sub")).unwrap();

    let output = cli
        .execute(&Commands::Tree {
            format: "json".to_string(),
        })
        .unwrap();
    let tree: serde_json::Value = serde_json::from_str(&output).unwrap();
    let enteros = &tree["categories"]["Alimentos"]["Lacteos"]["Enteros"];
    assert!(enteros.get("items").is_some());
    assert!(enteros.get("Sub").is_none());
    assert_eq!(tree["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn explicit_config_file_replaces_workspace_file() {
    let (temp, _) = context_with(TIENDA_CONFIG);
    let other = temp.path().join("other.toml");
    fs::write(&other, "[catalog]\nbase_path = \"Deposito\"\n").unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), Some(other)).unwrap();
    assert!(cli.base_path().ends_with("Deposito"));
    assert!(cli.config().catalog.template.is_none());

    let rendered = cli.execute(&Commands::Config).unwrap();
    assert!(rendered.contains("base_path = \"Deposito\""));
    assert!(rendered.contains("record_file = \"productos.csv\""));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = CliContext::new(
        temp.path().to_path_buf(),
        Some(temp.path().join("nope.toml")),
    );
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn invalid_field_list_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("gondola.toml"),
        "[catalog]\nfields = [\"ID\", \"Nombre\", \"Precio\", \"Precio\"]\n",
    )
    .unwrap();
    let result = CliContext::new(temp.path().to_path_buf(), None);
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}
