// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout the projection engine.
//!
//! This module provides the foundational types for the library:
//! - [`ProjectionError`] - Configuration and input errors
//! - [`ObservationValue`] / [`Entries`] - Ordered payload representation
//! - [`Representation`] - Observation payload shape identifier

pub mod error;
pub mod value;

pub use error::{ProjectionError, Result};
pub use value::{Entries, ObservationValue, UNAVAILABLE};

use serde::{Deserialize, Serialize};

/// Payload shape of an observation.
///
/// A closed set defined by the MTConnect standard. Declaration order is the
/// order in which buckets of one type appear in an output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Representation {
    /// Single scalar value
    Value,
    /// Flat key -> scalar map
    DataSet,
    /// Key -> (key -> scalar) map
    Table,
}

impl Default for Representation {
    fn default() -> Self {
        Representation::Value
    }
}

/// Error returned when parsing a `Representation` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRepresentationError {
    _private: (),
}

impl std::fmt::Display for ParseRepresentationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid representation, expected 'VALUE', 'DATA_SET', or 'TABLE'"
        )
    }
}

impl std::error::Error for ParseRepresentationError {}

impl std::str::FromStr for Representation {
    type Err = ParseRepresentationError;

    /// Accepts exactly the serialized names, as serde does.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Representation::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or(ParseRepresentationError { _private: () })
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Representation {
    /// All representations in declaration order.
    pub const ALL: [Representation; 3] = [
        Representation::Value,
        Representation::DataSet,
        Representation::Table,
    ];

    /// Convert to the MTConnect string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Value => "VALUE",
            Representation::DataSet => "DATA_SET",
            Representation::Table => "TABLE",
        }
    }

    /// Suffix appended to a type's element name to form its bucket name.
    pub fn bucket_suffix(&self) -> &'static str {
        match self {
            Representation::Value => "",
            Representation::DataSet => "DataSet",
            Representation::Table => "Table",
        }
    }

    /// Bucket name for an element name in this representation.
    pub fn bucket_name(&self, element: &str) -> String {
        format!("{element}{}", self.bucket_suffix())
    }

    /// Check if this representation carries a map payload.
    pub fn is_keyed(&self) -> bool {
        !matches!(self, Representation::Value)
    }
}
