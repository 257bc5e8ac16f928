// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Partition and dispatch engine.
//!
//! Walks an observation sequence once, looks up each observation's
//! `(type, representation)` key in the registry and appends the built record
//! to the partition of the matching entry. Partitions are indexed by registry
//! position, so arrival order is kept inside each bucket and bucket order is
//! the registry's declaration order.

use tracing::{debug, trace};

use crate::observation::Observation;
use crate::registry::{global_registry, ProjectionRegistry};

use super::document::{assemble, OutputDocument};
use super::record::Record;

/// Per-entry record lists produced by one projection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    slots: Vec<Vec<Record>>,
}

impl Partitions {
    /// Empty partitions, one per registry entry.
    pub fn for_registry(registry: &ProjectionRegistry) -> Self {
        Self {
            slots: (0..registry.len()).map(|_| Vec::new()).collect(),
        }
    }

    /// Append a record to the partition at a registry position.
    ///
    /// Positions outside the registry are ignored.
    pub fn push(&mut self, index: usize, record: Record) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.push(record);
        }
    }

    /// Append several records to one partition.
    pub fn extend(&mut self, index: usize, records: impl IntoIterator<Item = Record>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.extend(records);
        }
    }

    /// Records collected for a registry position.
    pub fn slot(&self, index: usize) -> &[Record] {
        self.slots.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of records across all partitions.
    pub fn record_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub(crate) fn into_slots(self) -> Vec<Vec<Record>> {
        self.slots
    }
}

/// Counters collected during one projection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    /// Observations read
    pub observed: usize,
    /// Observations that produced a record
    pub projected: usize,
    /// Observations with no registry entry
    pub unmapped: usize,
    /// Projected observations whose payload did not fit the representation
    pub malformed: usize,
}

impl ProjectionStats {
    /// Add another pass's counters to this one.
    pub fn merge(&mut self, other: &ProjectionStats) {
        self.observed += other.observed;
        self.projected += other.projected;
        self.unmapped += other.unmapped;
        self.malformed += other.malformed;
    }

    /// Check if every observation was projected from a well-formed payload.
    pub fn is_clean(&self) -> bool {
        self.unmapped == 0 && self.malformed == 0
    }
}

/// Projects observation sequences through a registry.
///
/// Cheap to copy; holds only a registry reference. One projector can serve
/// any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'r> {
    registry: &'r ProjectionRegistry,
}

impl Default for Projector<'static> {
    fn default() -> Self {
        Self::new(global_registry())
    }
}

impl<'r> Projector<'r> {
    /// Create a projector over a registry.
    pub fn new(registry: &'r ProjectionRegistry) -> Self {
        Self { registry }
    }

    /// The registry this projector dispatches through.
    pub fn registry(&self) -> &'r ProjectionRegistry {
        self.registry
    }

    /// Partition observations by registry entry.
    pub fn partition<'a, I>(&self, observations: I) -> (Partitions, ProjectionStats)
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut partitions = Partitions::for_registry(self.registry);
        let mut stats = ProjectionStats::default();

        for observation in observations {
            stats.observed += 1;

            let Some(index) = self
                .registry
                .index_of(&observation.type_id, observation.representation)
            else {
                stats.unmapped += 1;
                debug!(
                    context = "projection",
                    type_id = %observation.type_id,
                    representation = %observation.representation,
                    data_item_id = %observation.data_item_id,
                    "No projection for observation, skipped"
                );
                continue;
            };

            if let Some(issue) = observation.payload_issue() {
                stats.malformed += 1;
                debug!(
                    context = "projection",
                    data_item_id = %observation.data_item_id,
                    sequence = observation.sequence,
                    issue,
                    "Malformed observation payload, projecting best effort"
                );
            }

            // index_of only returns positions of existing entries
            if let Some(entry) = self.registry.entry(index) {
                partitions.push(index, entry.build(observation));
                stats.projected += 1;
            }
        }

        trace!(
            context = "projection",
            observed = stats.observed,
            projected = stats.projected,
            unmapped = stats.unmapped,
            malformed = stats.malformed,
            "Partitioned observations"
        );

        (partitions, stats)
    }

    /// Project observations into a document.
    pub fn project<'a, I>(&self, observations: I) -> OutputDocument
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        self.project_with_stats(observations).0
    }

    /// Project observations into a document and report counters.
    pub fn project_with_stats<'a, I>(&self, observations: I) -> (OutputDocument, ProjectionStats)
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let (partitions, stats) = self.partition(observations);
        (assemble(partitions, self.registry), stats)
    }
}

/// Project observations through the process-wide standard registry.
pub fn project<'a, I>(observations: I) -> OutputDocument
where
    I: IntoIterator<Item = &'a Observation>,
{
    Projector::default().project(observations)
}

/// Project observations through a specific registry.
pub fn project_with<'a, I>(observations: I, registry: &ProjectionRegistry) -> OutputDocument
where
    I: IntoIterator<Item = &'a Observation>,
{
    Projector::new(registry).project(observations)
}
