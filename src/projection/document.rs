// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Output document assembly and serialization.
//!
//! An [`OutputDocument`] is an ordered list of buckets. A bucket is either
//! present with at least one record or absent; there is no empty bucket.
//! Serialized, the document is a JSON object keyed by bucket name in registry
//! order, so absent buckets never appear as `null` or `[]`.

use std::fmt;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::core::{ProjectionError, Representation, Result};
use crate::observation::Observation;
use crate::registry::ProjectionRegistry;

use super::engine::Partitions;
use super::record::{DataSetRecord, Record, TableRecord, ValueRecord};

/// Records of one `(type, representation)` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    name: String,
    type_id: String,
    representation: Representation,
    records: Vec<Record>,
}

impl Bucket {
    /// External field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type identifier of the records.
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Representation of the records.
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Records in arrival order. Never empty.
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Projected document, created fresh per query and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDocument {
    buckets: Vec<Bucket>,
}

/// Copy non-empty partitions into a document, in registry order.
pub fn assemble(partitions: Partitions, registry: &ProjectionRegistry) -> OutputDocument {
    let buckets = registry
        .entries()
        .zip(partitions.into_slots())
        .filter(|(_, records)| !records.is_empty())
        .map(|(entry, records)| Bucket {
            name: entry.bucket().to_string(),
            type_id: entry.type_id().to_string(),
            representation: entry.representation(),
            records,
        })
        .collect();
    OutputDocument { buckets }
}

impl OutputDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document has no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Buckets in document order.
    pub fn buckets(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    /// Bucket names in document order.
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(Bucket::name)
    }

    /// Look up a bucket by name.
    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Records of a bucket, if present.
    pub fn records(&self, name: &str) -> Option<&[Record]> {
        self.get(name).map(Bucket::records)
    }

    /// Check if a bucket is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Total number of records.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }

    /// Reverse the projection: one observation per record, bucket by bucket.
    pub fn to_observations(&self) -> Vec<Observation> {
        self.buckets
            .iter()
            .flat_map(|bucket| {
                bucket
                    .records
                    .iter()
                    .map(|record| record.to_observation(&bucket.type_id))
            })
            .collect()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProjectionError::parse("document", e.to_string()))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ProjectionError::parse("document", e.to_string()))
    }

    /// Parse a document, resolving bucket names through a registry.
    ///
    /// Unknown bucket names are skipped and empty buckets are dropped. The
    /// result is in registry order regardless of the key order in `json`.
    /// Records pass through the registry's builders, so a map VALUE or a
    /// missing value becomes `UNAVAILABLE`, nested DATA_SET maps are dropped
    /// and `count` is recomputed.
    pub fn from_json(json: &str, registry: &ProjectionRegistry) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let document = DocumentSeed::new(registry)
            .deserialize(&mut deserializer)
            .map_err(|e| ProjectionError::parse("document", e.to_string()))?;
        deserializer
            .end()
            .map_err(|e| ProjectionError::parse("document", e.to_string()))?;
        Ok(document)
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.name, &bucket.records)?;
        }
        map.end()
    }
}

/// Registry-driven deserializer for [`OutputDocument`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentSeed<'r> {
    registry: &'r ProjectionRegistry,
}

impl<'r> DocumentSeed<'r> {
    /// Create a seed resolving buckets through `registry`.
    pub fn new(registry: &'r ProjectionRegistry) -> Self {
        Self { registry }
    }
}

impl<'de> DeserializeSeed<'de> for DocumentSeed<'_> {
    type Value = OutputDocument;

    fn deserialize<D: de::Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for DocumentSeed<'_> {
    type Value = OutputDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of bucket names to record arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut partitions = Partitions::for_registry(self.registry);

        while let Some(bucket) = map.next_key::<String>()? {
            let Some(index) = self.registry.bucket_index(&bucket) else {
                debug!(
                    context = "document",
                    bucket = %bucket,
                    "Unknown bucket, skipped"
                );
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            let Some(entry) = self.registry.entry(index) else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            let records: Vec<Record> = match entry.representation() {
                Representation::Value => map
                    .next_value::<Vec<ValueRecord>>()?
                    .into_iter()
                    .map(Record::from)
                    .collect(),
                Representation::DataSet => map
                    .next_value::<Vec<DataSetRecord>>()?
                    .into_iter()
                    .map(Record::from)
                    .collect(),
                Representation::Table => map
                    .next_value::<Vec<TableRecord>>()?
                    .into_iter()
                    .map(Record::from)
                    .collect(),
            };
            // Rebuild through the entry so parsed records obey the same
            // shape rules as projected ones (payload, count).
            let records = records
                .iter()
                .map(|record| entry.build(&record.to_observation(entry.type_id())));
            partitions.extend(index, records);
        }

        Ok(assemble(partitions, self.registry))
    }
}
