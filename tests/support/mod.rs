//! Shared fixtures: a seeded workspace in a temp dir and helpers to read its files.

use gondola::store::{CsvRecordStore, RecordStore};
use gondola::tooling::cli::{CliContext, Commands};
use gondola::types::Item;
use std::path::PathBuf;
use tempfile::TempDir;

pub const ENTEROS: &str = "Alimentos/Lacteos/Enteros";

pub struct Workspace {
    // Held so the directory lives as long as the fixture.
    _temp: TempDir,
    pub cli: CliContext,
}

impl Workspace {
    /// Empty workspace; nothing on disk until a command runs.
    pub fn empty() -> Self {
        let temp = TempDir::new().unwrap();
        let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
        Self { _temp: temp, cli }
    }

    /// Workspace with the default hierarchy seeded by `verify`.
    pub fn seeded() -> Self {
        let workspace = Self::empty();
        workspace.run(Commands::Verify {
            format: "text".to_string(),
        });
        workspace
    }

    pub fn run(&self, command: Commands) -> String {
        self.cli.execute(&command).unwrap()
    }

    pub fn run_json(&self, command: Commands) -> serde_json::Value {
        serde_json::from_str(&self.run(command)).unwrap()
    }

    /// Record file of a leaf given as `a/b/c`.
    pub fn record_path(&self, category: &str) -> PathBuf {
        self.cli.base_path().join(category).join("productos.csv")
    }

    pub fn items(&self, category: &str) -> Vec<Item> {
        CsvRecordStore::new()
            .read(&self.record_path(category))
            .unwrap()
    }

    pub fn add(&self, category: &str, name: &str, price: &str, stock: &str) -> String {
        self.run(Commands::Add {
            category: Some(category.to_string()),
            name: Some(name.to_string()),
            price: Some(price.to_string()),
            stock: Some(stock.to_string()),
        })
    }
}

pub fn ids(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

pub fn names(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.name.clone()).collect()
}
