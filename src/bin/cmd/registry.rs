// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry command - inspect projection entries.

use std::path::PathBuf;

use clap::Subcommand;
use mtconnect_projection::Representation;

use crate::common::{load_registry, Result};

/// Inspect the projection registry.
#[derive(Subcommand, Clone, Debug)]
pub enum RegistryCmd {
    /// List entries in bucket order
    List {
        /// Only show entries whose type or bucket contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Registry configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show the buckets of one type
    Show {
        /// Type identifier (e.g. CONTROLLER_MODE)
        #[arg(value_name = "TYPE")]
        type_id: String,

        /// Registry configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl RegistryCmd {
    pub fn run(self) -> Result<()> {
        match self {
            RegistryCmd::List { filter, config } => cmd_list(filter, config),
            RegistryCmd::Show { type_id, config } => cmd_show(type_id, config),
        }
    }
}

/// Cmd: List entries
fn cmd_list(filter: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let registry = load_registry(config.as_ref())?;
    let filter = filter.map(|f| f.to_lowercase());

    let mut shown = 0;
    for entry in registry.entries() {
        if let Some(ref pattern) = filter {
            if !entry.type_id().to_lowercase().contains(pattern)
                && !entry.bucket().to_lowercase().contains(pattern)
            {
                continue;
            }
        }
        println!(
            "{:<32} {:<9} {}",
            entry.type_id(),
            entry.representation().as_str(),
            entry.bucket()
        );
        shown += 1;
    }

    eprintln!("{shown} of {} entries", registry.len());
    Ok(())
}

/// Cmd: Show one type
fn cmd_show(type_id: String, config: Option<PathBuf>) -> Result<()> {
    let registry = load_registry(config.as_ref())?;

    if !registry.contains_type(&type_id) {
        return Err(anyhow::anyhow!("Type not registered: {type_id}"));
    }

    println!("=== {type_id} ===");
    for representation in Representation::ALL {
        match registry.lookup(&type_id, representation) {
            Some(entry) => println!("  {:<9} -> {}", representation.as_str(), entry.bucket()),
            None => println!("  {:<9} -> (not projected)", representation.as_str()),
        }
    }
    Ok(())
}
