// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Projection registry.
//!
//! Maps each `(type, representation)` key to the bucket its records are
//! grouped under and the builder that produces them. A registry is built once
//! at startup and is immutable afterwards, so it can be shared between any
//! number of concurrent projections without locking.
//!
//! # Example
//!
//! ```
//! use mtconnect_projection::core::Representation;
//! use mtconnect_projection::registry::ProjectionRegistry;
//!
//! let registry = ProjectionRegistry::standard()?;
//! let entry = registry.lookup("ALARM", Representation::DataSet).unwrap();
//! assert_eq!(entry.bucket(), "AlarmDataSet");
//! # Ok::<(), mtconnect_projection::ProjectionError>(())
//! ```

pub mod builders;
pub mod vocabulary;

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::core::{ProjectionError, Representation, Result};
use crate::observation::Observation;
use crate::projection::record::Record;

pub use builders::{BuilderSet, RecordBuilder};
pub use vocabulary::{element_name, EventType, Vocabulary};

/// One `(type, representation) -> (bucket, builder)` association.
#[derive(Debug, Clone)]
pub struct ProjectionEntry {
    type_id: String,
    representation: Representation,
    bucket: String,
    builder: RecordBuilder,
}

impl ProjectionEntry {
    /// Type identifier matched against observations.
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Representation matched against observations.
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// External field name of the bucket.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Convert an observation into this entry's record shape.
    pub fn build(&self, observation: &Observation) -> Record {
        (self.builder)(observation)
    }
}

/// Immutable projection table.
#[derive(Debug, Clone)]
pub struct ProjectionRegistry {
    entries: Vec<ProjectionEntry>,
    /// type id -> entry index per representation slot
    by_type: HashMap<String, [Option<usize>; 3]>,
    by_bucket: HashMap<String, usize>,
}

impl ProjectionRegistry {
    /// Build the registry for the standard event vocabulary.
    pub fn standard() -> Result<Self> {
        RegistryBuilder::new()
            .declare_vocabulary(Vocabulary::standard())
            .map(RegistryBuilder::build)
    }

    /// Start building a custom registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Position of the entry for a key, in declaration order.
    pub fn index_of(&self, type_id: &str, representation: Representation) -> Option<usize> {
        self.by_type
            .get(type_id)
            .and_then(|slots| slots[builders::slot(representation)])
    }

    /// Look up the entry for a key.
    ///
    /// `None` means no projection is defined; callers skip the observation.
    pub fn lookup(&self, type_id: &str, representation: Representation) -> Option<&ProjectionEntry> {
        self.index_of(type_id, representation)
            .map(|index| &self.entries[index])
    }

    /// Position of the entry owning a bucket name.
    pub fn bucket_index(&self, bucket: &str) -> Option<usize> {
        self.by_bucket.get(bucket).copied()
    }

    /// Look up the entry owning a bucket name.
    pub fn lookup_bucket(&self, bucket: &str) -> Option<&ProjectionEntry> {
        self.bucket_index(bucket).map(|index| &self.entries[index])
    }

    /// Entry at a declaration position.
    pub fn entry(&self, index: usize) -> Option<&ProjectionEntry> {
        self.entries.get(index)
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> std::slice::Iter<'_, ProjectionEntry> {
        self.entries.iter()
    }

    /// Check if any representation of a type is registered.
    pub fn contains_type(&self, type_id: &str) -> bool {
        self.by_type.contains_key(type_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A wildcard type exclusion compiled to an anchored regex.
#[derive(Debug, Clone)]
struct TypePattern {
    source: String,
    regex: Regex,
}

impl TypePattern {
    /// Compile a pattern where `*` matches any run of characters.
    fn new(pattern: &str) -> Result<Self> {
        let mut regex_pattern = String::from("^");
        for (i, part) in pattern.split('*').enumerate() {
            if i > 0 {
                regex_pattern.push_str(".*");
            }
            regex_pattern.push_str(&regex::escape(part));
        }
        regex_pattern.push('$');

        let regex = Regex::new(&regex_pattern)
            .map_err(|e| ProjectionError::invalid_pattern(pattern, e.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    fn matches(&self, type_id: &str) -> bool {
        self.regex.is_match(type_id)
    }
}

/// Builder for [`ProjectionRegistry`].
///
/// Entries are kept in registration order, which becomes the bucket order of
/// every projected document. All registration errors are configuration
/// defects and should abort startup.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    builders: BuilderSet,
    exclusions: Vec<TypePattern>,
    entries: Vec<ProjectionEntry>,
    by_type: HashMap<String, [Option<usize>; 3]>,
    by_bucket: HashMap<String, usize>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create an empty builder using the standard record builders.
    pub fn new() -> Self {
        Self {
            builders: BuilderSet::standard(),
            exclusions: Vec::new(),
            entries: Vec::new(),
            by_type: HashMap::new(),
            by_bucket: HashMap::new(),
        }
    }

    /// Use a different builder set for subsequent declarations.
    pub fn with_builders(mut self, builders: BuilderSet) -> Self {
        self.builders = builders;
        self
    }

    /// Exclude types matching a wildcard pattern (e.g. `"PART_*"`).
    ///
    /// Applies to registrations made after this call.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclusions.push(TypePattern::new(pattern)?);
        Ok(self)
    }

    fn is_excluded(&self, type_id: &str) -> Option<&str> {
        self.exclusions
            .iter()
            .find(|p| p.matches(type_id))
            .map(|p| p.source.as_str())
    }

    /// Register a key with an explicit builder.
    pub fn register(
        mut self,
        type_id: impl Into<String>,
        representation: Representation,
        bucket: impl Into<String>,
        builder: RecordBuilder,
    ) -> Result<Self> {
        let type_id = type_id.into();
        let bucket = bucket.into();

        if let Some(pattern) = self.is_excluded(&type_id) {
            debug!(
                context = "registry",
                type_id = %type_id,
                pattern,
                "Type excluded from registry"
            );
            return Ok(self);
        }

        validate_bucket_name(&bucket)?;

        let slot = builders::slot(representation);
        if self
            .by_type
            .get(&type_id)
            .is_some_and(|slots| slots[slot].is_some())
        {
            return Err(ProjectionError::duplicate_registration(type_id, representation));
        }
        if self.by_bucket.contains_key(&bucket) {
            return Err(ProjectionError::duplicate_bucket(bucket, type_id));
        }

        let index = self.entries.len();
        self.by_type.entry(type_id.clone()).or_insert([None; 3])[slot] = Some(index);
        self.by_bucket.insert(bucket.clone(), index);
        self.entries.push(ProjectionEntry {
            type_id,
            representation,
            bucket,
            builder,
        });
        Ok(self)
    }

    /// Register a key using the builder set's builder for its representation.
    pub fn declare(
        self,
        type_id: impl Into<String>,
        representation: Representation,
        bucket: impl Into<String>,
    ) -> Result<Self> {
        let bucket = bucket.into();
        let builder = self
            .builders
            .get(representation)
            .ok_or_else(|| ProjectionError::missing_builder(bucket.clone(), representation))?;
        self.register(type_id, representation, bucket, builder)
    }

    /// Declare every representation of one event type, in the type's order.
    pub fn declare_type(mut self, event_type: &EventType) -> Result<Self> {
        for &representation in &event_type.representations {
            self = self.declare(
                event_type.id.as_str(),
                representation,
                event_type.bucket_name(representation),
            )?;
        }
        Ok(self)
    }

    /// Declare a whole vocabulary, types ordered by element name.
    pub fn declare_vocabulary(mut self, mut vocabulary: Vocabulary) -> Result<Self> {
        vocabulary.sort_by_name();
        for event_type in vocabulary.iter() {
            self = self.declare_type(event_type)?;
        }
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> ProjectionRegistry {
        debug!(
            context = "registry",
            entries = self.entries.len(),
            types = self.by_type.len(),
            "Projection registry built"
        );
        ProjectionRegistry {
            entries: self.entries,
            by_type: self.by_type,
            by_bucket: self.by_bucket,
        }
    }
}

fn validate_bucket_name(bucket: &str) -> Result<()> {
    let mut chars = bucket.chars();
    match chars.next() {
        None => Err(ProjectionError::invalid_bucket_name(bucket, "empty name")),
        Some(first) if !first.is_ascii_alphabetic() => Err(ProjectionError::invalid_bucket_name(
            bucket,
            "must start with a letter",
        )),
        Some(_) if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') => Err(
            ProjectionError::invalid_bucket_name(bucket, "must be alphanumeric"),
        ),
        Some(_) => Ok(()),
    }
}

/// Process-wide registry for the standard vocabulary.
static GLOBAL_REGISTRY: OnceLock<ProjectionRegistry> = OnceLock::new();

/// Get the process-wide standard registry.
///
/// # Panics
///
/// Panics if the built-in vocabulary fails to register, which is a defect in
/// the vocabulary table.
pub fn global_registry() -> &'static ProjectionRegistry {
    GLOBAL_REGISTRY.get_or_init(|| {
        ProjectionRegistry::standard()
            .unwrap_or_else(|e| panic!("built-in event vocabulary is invalid: {e}"))
    })
}
