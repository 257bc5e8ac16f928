// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use mtconnect_projection::{ProjectionConfig, ProjectionRegistry};
use tracing_subscriber::EnvFilter;

pub type Result<T = ()> = anyhow::Result<T>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `warn`, or `debug` when verbose.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read an input file, or stdin for `None` and `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Build the registry for a command: from a config file, or the standard one.
pub fn load_registry(config: Option<&PathBuf>) -> Result<ProjectionRegistry> {
    let registry = match config {
        Some(path) => ProjectionConfig::from_path(path)?.build_registry()?,
        None => ProjectionRegistry::standard()?,
    };
    Ok(registry)
}
