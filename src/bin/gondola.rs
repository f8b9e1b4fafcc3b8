//! Gondola CLI Binary
//!
//! Command-line interface for the gondola inventory catalog.

use anyhow::Context;
use clap::Parser;
use gondola::logging::init_logging;
use gondola::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.workspace.clone(), cli.config.clone())
        .context("Error initializing workspace")?;
    init_logging(Some(&context.logging_config(cli))).context("Error initializing logging")?;
    let output = context.execute(&cli.command_or_menu())?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
