// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Flatten command - Events document in, observations out.

use std::path::PathBuf;

use clap::Args;
use mtconnect_projection::io::write_observations;
use mtconnect_projection::OutputDocument;

use crate::common::{load_registry, read_input, Result};

/// Turn a document back into observations (JSON Lines).
#[derive(Args, Clone, Debug)]
pub struct FlattenCmd {
    /// Document JSON (stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Registry configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl FlattenCmd {
    pub fn run(self) -> Result<()> {
        let registry = load_registry(self.config.as_ref())?;
        let document = OutputDocument::from_json(&read_input(self.input.as_deref())?, &registry)?;
        let stdout = std::io::stdout();
        write_observations(stdout.lock(), &document.to_observations())?;
        Ok(())
    }
}
