//! Error types shared by the catalog, store, and CLI layers.

use std::path::PathBuf;
use thiserror::Error;

/// Failures touching record files or category directories.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Errors surfaced by catalog operations and CLI commands.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category '{0}' has subcategories and holds no records")]
    NotALeaf(String),

    #[error("Directory {0:?} holds both a record file and subcategories")]
    MixedCategory(PathBuf),

    #[error("Item with ID {0} not found")]
    ItemNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to get user input: {0}")]
    PromptFailed(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::StorageError(StorageError::IoError(err))
    }
}
