// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Observation stream I/O.
//!
//! Reads the observation sequences handed over by the agent's stream buffer
//! (JSON array or JSON Lines) and writes flattened observations back out.

pub mod detection;
pub mod json;

pub use detection::{detect_input_format, InputFormat};
pub use json::{parse_observations, read_observations, write_observations};
