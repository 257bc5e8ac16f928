// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Input format detection for observation streams.
//!
//! Observations arrive either as one JSON array or as JSON Lines (one object
//! per line, or simply concatenated objects). The format is identified from
//! the first significant character only; file names play no part, so blank
//! input has no format and parses to no observations.

/// Serialized layout of an observation stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A single JSON array of observations
    JsonArray,
    /// Whitespace-separated JSON objects
    JsonLines,
}

/// Detect the format of an observation stream from its content.
///
/// Returns `None` for blank input.
pub fn detect_input_format(text: &str) -> Option<InputFormat> {
    match text.trim_start().as_bytes().first()? {
        b'[' => Some(InputFormat::JsonArray),
        _ => Some(InputFormat::JsonLines),
    }
}
