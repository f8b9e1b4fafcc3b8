//! Tooling & Integration Layer
//!
//! The `gondola` command line: argument parsing, terminal prompts and text output over
//! the catalog, verifier, navigator and item services.

pub mod cli;
pub mod format;
pub mod prompt;

pub use cli::{Cli, CliContext, Commands};
pub use prompt::TerminalMenu;
