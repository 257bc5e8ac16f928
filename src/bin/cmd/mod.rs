// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod flatten;
mod project;
mod registry;

pub use flatten::FlattenCmd;
pub use project::ProjectCmd;
pub use registry::RegistryCmd;
