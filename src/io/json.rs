// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON observation streams.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mtconnect_projection::io::parse_observations;
//!
//! let text = r#"{"dataItemId":"a1","type":"ALARM","timestamp":"2026-01-01T00:00:00Z","sequence":1,"value":"OVERTRAVEL"}"#;
//! let observations = parse_observations(text)?;
//! assert_eq!(observations.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

use crate::core::{ProjectionError, Result};
use crate::observation::Observation;

use super::detection::{detect_input_format, InputFormat};

/// Parse observations from text in either supported layout.
///
/// Blank input yields no observations.
pub fn parse_observations(text: &str) -> Result<Vec<Observation>> {
    match detect_input_format(text) {
        None => Ok(Vec::new()),
        Some(InputFormat::JsonArray) => serde_json::from_str(text)
            .map_err(|e| ProjectionError::parse("observations", e.to_string())),
        Some(InputFormat::JsonLines) => parse_json_lines(text),
    }
}

fn parse_json_lines(text: &str) -> Result<Vec<Observation>> {
    let mut observations = Vec::new();
    for (position, item) in serde_json::Deserializer::from_str(text)
        .into_iter::<Observation>()
        .enumerate()
    {
        let observation = item.map_err(|e| {
            ProjectionError::parse(format!("observation #{}", position + 1), e.to_string())
        })?;
        observations.push(observation);
    }
    Ok(observations)
}

/// Read and parse all observations from a reader.
pub fn read_observations<R: Read>(mut reader: R) -> Result<Vec<Observation>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_observations(&text)
}

/// Write observations as JSON Lines.
pub fn write_observations<W: Write>(mut writer: W, observations: &[Observation]) -> Result<()> {
    for observation in observations {
        serde_json::to_writer(&mut writer, observation)
            .map_err(|e| ProjectionError::parse("observations", e.to_string()))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
