//! CLI Tooling
//!
//! Command-line interface for the gondola catalog. Every command is workspace-scoped:
//! the catalog root, record file name and schema come from the layered configuration.
//! Item commands take `--category a/b/c` or fall back to interactive navigation.

use crate::config::{ConfigLoader, GondolaConfig};
use crate::error::ApiError;
use crate::items::{ItemCommandService, ItemDraft, ItemPatch, SortKey, SortOrder};
use crate::logging::LoggingConfig;
use crate::navigator::{MenuInput, NavigationOutcome, Navigator, ScriptedInput};
use crate::store::CsvRecordStore;
use crate::tooling::format::{
    format_averages, format_catalog_tree, format_items_table, format_leaf_items,
    format_verify_report,
};
use crate::tooling::prompt::{self, TerminalMenu};
use crate::tree::{Catalog, CatalogBuilder};
use crate::verify::{StructureVerifier, VerifyReport};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Gondola CLI - inventory of nested supermarket categories
#[derive(Parser, Debug)]
#[command(name = "gondola")]
#[command(about = "Manage supermarket inventory stored as CSV files in nested category folders")]
pub struct Cli {
    /// Command to run (default: interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The command to run; a bare `gondola` opens the menu.
    pub fn command_or_menu(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Menu)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create missing categories and record files, repair damaged record files
    Verify {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the category tree
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Browse categories and print the chosen record file
    Navigate {
        /// Comma-separated menu answers instead of reading the terminal (e.g. 1,2,0)
        #[arg(long)]
        choices: Option<String>,
    },
    /// Add an item to a category
    Add {
        /// Category path, e.g. Alimentos/Lacteos/Enteros
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        stock: Option<String>,
    },
    /// List the items of a category
    Show {
        #[arg(long)]
        category: Option<String>,
        /// Only items whose name contains this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Change fields of an item
    Modify {
        #[arg(long)]
        category: Option<String>,
        /// Item ID
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        stock: Option<String>,
    },
    /// Delete an item and re-index the rest
    Delete {
        #[arg(long)]
        category: Option<String>,
        /// Item ID
        #[arg(long)]
        id: Option<String>,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Sort the items of a category
    Sort {
        #[arg(long)]
        category: Option<String>,
        /// Sort key
        #[arg(long, value_enum, default_value_t = SortKey::Price)]
        by: SortKey,
        /// Largest first
        #[arg(long)]
        descending: bool,
        /// Write the sorted order back, re-indexed
        #[arg(long)]
        save: bool,
    },
    /// Mean price and stock of a category or the whole catalog
    Average {
        #[arg(long, conflicts_with = "all")]
        category: Option<String>,
        /// Average over every category
        #[arg(long)]
        all: bool,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Verify, then run the interactive menu (default)
    Menu,
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Verify { .. } => "verify",
        Commands::Tree { .. } => "tree",
        Commands::Navigate { .. } => "navigate",
        Commands::Add { .. } => "add",
        Commands::Show { .. } => "show",
        Commands::Modify { .. } => "modify",
        Commands::Delete { .. } => "delete",
        Commands::Sort { .. } => "sort",
        Commands::Average { .. } => "average",
        Commands::Config => "config",
        Commands::Menu => "menu",
    }
}

/// A leaf picked by `--category` or by navigation.
#[derive(Debug, Clone)]
struct LeafTarget {
    label: String,
    path: PathBuf,
}

/// Outcome of resolving the target leaf of an item command.
enum LeafChoice {
    Leaf(LeafTarget),
    /// Navigation ended without a leaf; holds the message for the operator.
    Cancelled(String),
}

/// CLI context for executing commands
pub struct CliContext {
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    config: GondolaConfig,
    store: CsvRecordStore,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let workspace_root = dunce::canonicalize(&workspace_root).map_err(|e| {
            ApiError::ConfigError(format!(
                "Workspace {} is not accessible: {}",
                workspace_root.display(),
                e
            ))
        })?;

        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        config.catalog.validate()?;

        Ok(Self {
            workspace_root,
            config_path,
            config,
            store: CsvRecordStore::new(),
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &GondolaConfig {
        &self.config
    }

    /// Catalog root resolved against the workspace.
    pub fn base_path(&self) -> PathBuf {
        self.config.catalog.resolve_base_path(&self.workspace_root)
    }

    /// Logging settings from config with any CLI flags applied on top.
    pub fn logging_config(&self, cli: &Cli) -> LoggingConfig {
        let mut logging = self.config.logging.clone();
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }

    /// Bring the catalog on disk in line with the configured structure.
    pub fn verify(&self) -> Result<VerifyReport, ApiError> {
        let catalog = &self.config.catalog;
        StructureVerifier::new(self.base_path(), &catalog.record_file, &catalog.fields)
            .with_store(&self.store)
            .ensure(catalog.template.as_ref())
    }

    /// Read the catalog on disk into memory.
    pub fn build_catalog(&self) -> Result<Catalog, ApiError> {
        let catalog = &self.config.catalog;
        CatalogBuilder::new(self.base_path())
            .with_record_file(catalog.record_file.clone())
            .with_fields(&catalog.fields)
            .with_mixed_policy(catalog.mixed_categories)
            .with_store(&self.store)
            .build()
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(
            command = command_name(command),
            workspace = %self.workspace_root.display(),
            "Executing command"
        );
        let result = self.execute_inner(command);
        if let Err(e) = &result {
            warn!(command = command_name(command), error = %e, "Command failed");
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Verify { format } => self.handle_verify(format),
            Commands::Tree { format } => self.handle_tree(format),
            Commands::Navigate { choices } => self.handle_navigate(choices.as_deref()),
            Commands::Add {
                category,
                name,
                price,
                stock,
            } => self.handle_add(
                category.as_deref(),
                name.clone(),
                price.clone(),
                stock.clone(),
            ),
            Commands::Show {
                category,
                filter,
                format,
            } => self.handle_show(category.as_deref(), filter.as_deref(), format),
            Commands::Modify {
                category,
                id,
                name,
                price,
                stock,
            } => {
                let patch = ItemPatch {
                    name: name.clone(),
                    price: price.clone(),
                    stock: stock.clone(),
                };
                self.handle_modify(category.as_deref(), id.as_deref(), patch)
            }
            Commands::Delete {
                category,
                id,
                force,
            } => self.handle_delete(category.as_deref(), id.as_deref(), *force),
            Commands::Sort {
                category,
                by,
                descending,
                save,
            } => {
                let order = if *descending {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                };
                self.handle_sort(category.as_deref(), *by, order, *save)
            }
            Commands::Average { category, all } => {
                self.handle_average(category.as_deref(), *all)
            }
            Commands::Config => self.handle_config(),
            Commands::Menu => self.run_menu(),
        }
    }

    fn handle_verify(&self, format: &str) -> Result<String, ApiError> {
        let report = self.verify()?;
        match format {
            "json" => to_json(&report),
            "text" => Ok(format_verify_report(&report)),
            other => Err(invalid_format(other)),
        }
    }

    fn handle_tree(&self, format: &str) -> Result<String, ApiError> {
        let catalog = self.build_catalog()?;
        match format {
            "json" => to_json(&catalog),
            "text" => Ok(format_catalog_tree(&catalog)),
            other => Err(invalid_format(other)),
        }
    }

    fn handle_navigate(&self, choices: Option<&str>) -> Result<String, ApiError> {
        let catalog = self.build_catalog()?;
        let outcome = match choices {
            Some(script) => Navigator::new(&catalog).run(&mut ScriptedInput::parse(script))?,
            None => Navigator::new(&catalog).run(&mut TerminalMenu)?,
        };
        Ok(match outcome {
            NavigationOutcome::Selected(path) => path.display().to_string(),
            NavigationOutcome::Exited => "No category selected".to_string(),
            NavigationOutcome::Empty(path) => format!("Category '{}' has no subcategories", path),
        })
    }

    fn handle_add(
        &self,
        category: Option<&str>,
        name: Option<String>,
        price: Option<String>,
        stock: Option<String>,
    ) -> Result<String, ApiError> {
        let target = match self.resolve_leaf(category)? {
            LeafChoice::Leaf(target) => target,
            LeafChoice::Cancelled(message) => return Ok(message),
        };
        let draft = match (name, price, stock) {
            (Some(name), Some(price), Some(stock)) => ItemDraft { name, price, stock },
            (None, None, None) => prompt::prompt_draft()?,
            _ => {
                return Err(ApiError::InvalidInput(
                    "--name, --price and --stock must be given together".to_string(),
                ))
            }
        };
        let result =
            ItemCommandService::add(&self.store, &target.path, &self.config.catalog.fields, draft)?;
        Ok(format!(
            "Item added to {} with ID {}\n\n{}",
            target.label,
            result.item.id,
            format_items_table(std::slice::from_ref(&result.item), &self.config.catalog.fields)
        ))
    }

    fn handle_show(
        &self,
        category: Option<&str>,
        filter: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(invalid_format(format));
        }
        let target = match self.resolve_leaf(category)? {
            LeafChoice::Leaf(target) => target,
            LeafChoice::Cancelled(message) => return Ok(message),
        };
        let result = ItemCommandService::show(&self.store, &target.path, filter)?;
        if format == "json" {
            return to_json(&json!({
                "category": target.label,
                "path": target.path,
                "total": result.total,
                "items": result.items,
            }));
        }
        let mut out = format_leaf_items(&target.label, &result.items, &self.config.catalog.fields);
        if let Some(needle) = filter {
            out.push_str(&format!(
                "\n{} of {} items match '{}'\n",
                result.items.len(),
                result.total,
                needle
            ));
        }
        Ok(out)
    }

    fn handle_modify(
        &self,
        category: Option<&str>,
        id: Option<&str>,
        patch: ItemPatch,
    ) -> Result<String, ApiError> {
        let target = match self.resolve_leaf(category)? {
            LeafChoice::Leaf(target) => target,
            LeafChoice::Cancelled(message) => return Ok(message),
        };
        let id = match id {
            Some(id) => id.to_string(),
            None => prompt::prompt_id("ID of the item to modify")?,
        };
        let patch = if patch.is_empty() {
            let current = ItemCommandService::get(&self.store, &target.path, &id)?;
            prompt::prompt_patch(&current)?
        } else {
            patch
        };
        if patch.is_empty() {
            return Ok("Nothing to change".to_string());
        }
        let result = ItemCommandService::modify(
            &self.store,
            &target.path,
            &self.config.catalog.fields,
            &id,
            &patch,
        )?;
        if result.before == result.after {
            return Ok(format!("Item {} already has these values", result.after.id));
        }
        Ok(format!(
            "Item {} updated in {}\n\n{}",
            result.after.id,
            target.label,
            format_items_table(std::slice::from_ref(&result.after), &self.config.catalog.fields)
        ))
    }

    fn handle_delete(
        &self,
        category: Option<&str>,
        id: Option<&str>,
        force: bool,
    ) -> Result<String, ApiError> {
        let target = match self.resolve_leaf(category)? {
            LeafChoice::Leaf(target) => target,
            LeafChoice::Cancelled(message) => return Ok(message),
        };
        let id = match id {
            Some(id) => id.to_string(),
            None => prompt::prompt_id("ID of the item to delete")?,
        };
        if !force {
            let current = ItemCommandService::get(&self.store, &target.path, &id)?;
            let confirmed =
                prompt::confirm(&format!("Delete item {} ({})?", current.id, current.name))?;
            if !confirmed {
                return Ok("Deletion cancelled".to_string());
            }
        }
        let result =
            ItemCommandService::delete(&self.store, &target.path, &self.config.catalog.fields, &id)?;
        Ok(format!(
            "Deleted item {} ({}) from {}; {} items remain",
            result.removed.id, result.removed.name, target.label, result.remaining
        ))
    }

    fn handle_sort(
        &self,
        category: Option<&str>,
        key: SortKey,
        order: SortOrder,
        save: bool,
    ) -> Result<String, ApiError> {
        let target = match self.resolve_leaf(category)? {
            LeafChoice::Leaf(target) => target,
            LeafChoice::Cancelled(message) => return Ok(message),
        };
        let result = ItemCommandService::sort(
            &self.store,
            &target.path,
            &self.config.catalog.fields,
            key,
            order,
            save,
        )?;
        let mut out = format_leaf_items(&target.label, &result.items, &self.config.catalog.fields);
        if result.saved {
            out.push_str("\nSorted order saved\n");
        }
        Ok(out)
    }

    fn handle_average(&self, category: Option<&str>, all: bool) -> Result<String, ApiError> {
        if all {
            let catalog = self.build_catalog()?;
            let result = ItemCommandService::average_catalog(&catalog);
            return Ok(format_averages("whole catalog", &result.averages, result.files));
        }
        let target = match self.resolve_leaf(category)? {
            LeafChoice::Leaf(target) => target,
            LeafChoice::Cancelled(message) => return Ok(message),
        };
        let result = ItemCommandService::average_leaf(&self.store, &target.path)?;
        Ok(format_averages(&target.label, &result.averages, result.files))
    }

    fn handle_config(&self) -> Result<String, ApiError> {
        let mut out = String::new();
        if let Some(path) = &self.config_path {
            out.push_str(&format!("# loaded from {}\n", path.display()));
        }
        let rendered = toml::to_string_pretty(&self.config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))?;
        out.push_str(&rendered);
        Ok(out)
    }

    /// Pick the leaf for an item command from `--category` or by navigating.
    fn resolve_leaf(&self, category: Option<&str>) -> Result<LeafChoice, ApiError> {
        let catalog = self.build_catalog()?;
        match category {
            Some(category) => {
                let records = catalog.resolve(category)?;
                Ok(LeafChoice::Leaf(LeafTarget {
                    label: leaf_label(&catalog.base_path, &records.path),
                    path: records.path.clone(),
                }))
            }
            None => self.navigate_to_leaf(&catalog, &mut TerminalMenu),
        }
    }

    fn navigate_to_leaf(
        &self,
        catalog: &Catalog,
        input: &mut dyn MenuInput,
    ) -> Result<LeafChoice, ApiError> {
        Ok(match Navigator::new(catalog).run(input)? {
            NavigationOutcome::Selected(path) => LeafChoice::Leaf(LeafTarget {
                label: leaf_label(&catalog.base_path, &path),
                path,
            }),
            NavigationOutcome::Exited => LeafChoice::Cancelled("No category selected".to_string()),
            NavigationOutcome::Empty(path) => {
                LeafChoice::Cancelled(format!("Category '{}' has no subcategories", path))
            }
        })
    }

    /// Verify the catalog, then loop over the main menu until the operator exits.
    ///
    /// The tree is rebuilt on every iteration so each action sees the files as they are
    /// now. A failing action is reported and the loop continues.
    fn run_menu(&self) -> Result<String, ApiError> {
        let report = self.verify()?;
        if !report.is_noop() || !report.is_valid() {
            println!("{}", format_verify_report(&report));
        }

        const ACTIONS: [&str; 9] = [
            "Show items",
            "Add item",
            "Modify item",
            "Delete item",
            "Sort items",
            "Average of a category",
            "Average of the whole catalog",
            "Category tree",
            "Exit",
        ];
        loop {
            let choice = prompt::select("Main menu", &ACTIONS)?;
            let command = match choice {
                0 => Commands::Show {
                    category: None,
                    filter: prompt::prompt_filter()?,
                    format: "text".to_string(),
                },
                1 => Commands::Add {
                    category: None,
                    name: None,
                    price: None,
                    stock: None,
                },
                2 => Commands::Modify {
                    category: None,
                    id: None,
                    name: None,
                    price: None,
                    stock: None,
                },
                3 => Commands::Delete {
                    category: None,
                    id: None,
                    force: false,
                },
                4 => {
                    let by = match prompt::select(
                        "Sort by",
                        &["Price", "Stock", "Price, then stock"],
                    )? {
                        0 => SortKey::Price,
                        1 => SortKey::Stock,
                        _ => SortKey::PriceThenStock,
                    };
                    let descending =
                        prompt::select("Order", &["Ascending", "Descending"])? == 1;
                    let save = prompt::confirm("Save the sorted order?")?;
                    Commands::Sort {
                        category: None,
                        by,
                        descending,
                        save,
                    }
                }
                5 => Commands::Average {
                    category: None,
                    all: false,
                },
                6 => Commands::Average {
                    category: None,
                    all: true,
                },
                7 => Commands::Tree {
                    format: "text".to_string(),
                },
                _ => return Ok("Goodbye".to_string()),
            };
            match self.execute(&command) {
                Ok(output) => println!("{}", output),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }
}

/// "Alimentos -> Lacteos -> Enteros" for a record file under `base`.
fn leaf_label(base: &Path, record_path: &Path) -> String {
    let dir = record_path.parent().unwrap_or(record_path);
    match dir.strip_prefix(base) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" -> "),
        Err(_) => dir.display().to_string(),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidInput(format!(
        "Invalid format: {} (must be 'text' or 'json')",
        format
    ))
}
