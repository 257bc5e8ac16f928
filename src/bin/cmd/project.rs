// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Project command - observations in, Events document out.

use std::path::PathBuf;

use clap::Args;
use mtconnect_projection::io::parse_observations;
use mtconnect_projection::Projector;

use crate::common::{load_registry, read_input, Result};

/// Project observations into a document.
#[derive(Args, Clone, Debug)]
pub struct ProjectCmd {
    /// Observations as a JSON array or JSON Lines (stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Registry configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Print projection counters to stderr
    #[arg(long)]
    stats: bool,
}

impl ProjectCmd {
    pub fn run(self) -> Result<()> {
        let registry = load_registry(self.config.as_ref())?;
        let observations = parse_observations(&read_input(self.input.as_deref())?)?;

        let (document, stats) = Projector::new(&registry).project_with_stats(&observations);

        let json = if self.pretty {
            document.to_json_pretty()?
        } else {
            document.to_json()?
        };
        println!("{json}");

        if self.stats {
            eprintln!(
                "observed: {}, projected: {}, unmapped: {}, malformed: {}, buckets: {}",
                stats.observed,
                stats.projected,
                stats.unmapped,
                stats.malformed,
                document.len()
            );
        }

        Ok(())
    }
}
