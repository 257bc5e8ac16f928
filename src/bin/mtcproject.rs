// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # mtcproject CLI
//!
//! Command-line front end for the MTConnect event projection engine.
//!
//! ## Usage
//!
//! ```sh
//! # Project observations into an Events document
//! mtcproject project observations.jsonl --pretty
//!
//! # Turn a document back into observations
//! mtcproject flatten document.json
//!
//! # Inspect the registry
//! mtcproject registry list --filter alarm
//! mtcproject registry show CONTROLLER_MODE
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{FlattenCmd, ProjectCmd, RegistryCmd};
use common::{init_logging, Result};

/// mtcproject - MTConnect event projection
///
/// Groups event observations into Value, DataSet and Table buckets.
#[derive(Parser, Clone)]
#[command(name = "mtcproject")]
#[command(about = "MTConnect event observation projection toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Project observations into an Events document
    Project(ProjectCmd),

    /// Flatten an Events document back into observations
    Flatten(FlattenCmd),

    /// Registry operations (list, show)
    #[command(subcommand)]
    Registry(RegistryCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Project(cmd) => cmd.run(),
        Commands::Flatten(cmd) => cmd.run(),
        Commands::Registry(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
