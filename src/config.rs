// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry configuration.
//!
//! A TOML file selects the vocabulary the registry is built from: the
//! standard event types, wildcard exclusions, and additional types (for
//! example types introduced by a newer standard version).
//!
//! ```toml
//! include_standard = true
//! exclude = ["PART_*"]
//!
//! [[types]]
//! id = "SPINDLE_PROFILE"
//! representations = ["VALUE", "TABLE"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ProjectionError, Representation};
use crate::registry::{element_name, EventType, ProjectionRegistry, RegistryBuilder, Vocabulary};

/// Errors raised while loading configuration or building its registry.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A type entry is unusable.
    #[error("Invalid type entry '{id}': {reason}")]
    InvalidType { id: String, reason: String },

    /// The resulting registry is inconsistent.
    #[error(transparent)]
    Registry(#[from] ProjectionError),
}

/// Extra event type declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    /// Type identifier (e.g. "SPINDLE_PROFILE")
    pub id: String,
    /// Element name; derived from `id` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Representations to declare; all three when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representations: Option<Vec<Representation>>,
}

impl TypeConfig {
    /// Convert into a vocabulary entry.
    pub fn to_event_type(&self) -> Result<EventType, ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::InvalidType {
                id: self.id.clone(),
                reason: "empty type identifier".to_string(),
            });
        }
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| element_name(&self.id));
        let mut event_type = EventType::new(self.id.clone(), name);
        if let Some(representations) = &self.representations {
            if representations.is_empty() {
                return Err(ConfigError::InvalidType {
                    id: self.id.clone(),
                    reason: "no representations listed".to_string(),
                });
            }
            event_type = event_type.with_representations(representations);
        }
        Ok(event_type)
    }
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Start from the standard vocabulary
    #[serde(default = "default_include_standard")]
    pub include_standard: bool,
    /// Wildcard patterns of type identifiers to leave out
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Additional types
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

fn default_include_standard() -> bool {
    true
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            include_standard: true,
            exclude: Vec::new(),
            types: Vec::new(),
        }
    }
}

impl ProjectionConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Vocabulary selected by this configuration, before exclusions.
    pub fn vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        let mut vocabulary = if self.include_standard {
            Vocabulary::standard()
        } else {
            Vocabulary::new()
        };
        for type_config in &self.types {
            vocabulary.push(type_config.to_event_type()?);
        }
        Ok(vocabulary)
    }

    /// Build the registry described by this configuration.
    pub fn build_registry(&self) -> Result<ProjectionRegistry, ConfigError> {
        let mut builder = RegistryBuilder::new();
        for pattern in &self.exclude {
            builder = builder.exclude(pattern)?;
        }
        let registry = builder.declare_vocabulary(self.vocabulary()?)?.build();
        tracing::debug!(
            context = "config",
            entries = registry.len(),
            extra_types = self.types.len(),
            exclusions = self.exclude.len(),
            "Registry built from configuration"
        );
        Ok(registry)
    }
}
