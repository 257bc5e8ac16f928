// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Observation input records.
//!
//! Observations are produced upstream by the agent's stream buffer and are
//! read-only inputs to projection. Their serialized form uses the MTConnect
//! JSON attribute names (`dataItemId`, `subType`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ObservationValue, Representation};

/// One timestamped, sequenced reading of an event data item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Originating data item id
    pub data_item_id: String,
    /// Data item name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Data item type (e.g. "ALARM", "CONTROLLER_MODE")
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    /// Payload shape
    #[serde(default)]
    pub representation: Representation,
    pub timestamp: DateTime<Utc>,
    /// Agent-assigned sequence number
    #[serde(default)]
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_id: Option<String>,
    /// Reset trigger reported with the observation (DATA_SET/TABLE)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_triggered: Option<String>,
    /// Payload; shape depends on `representation`
    #[serde(default)]
    pub value: ObservationValue,
}

impl Observation {
    /// Create an observation with a null payload, sequence 0 and the current time.
    pub fn new(
        data_item_id: impl Into<String>,
        type_id: impl Into<String>,
        representation: Representation,
    ) -> Self {
        Self {
            data_item_id: data_item_id.into(),
            name: None,
            type_id: type_id.into(),
            sub_type: None,
            representation,
            timestamp: Utc::now(),
            sequence: 0,
            composition_id: None,
            reset_triggered: None,
            value: ObservationValue::Null,
        }
    }

    /// Set the payload.
    pub fn with_value(mut self, value: impl Into<ObservationValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the data item name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the sub type.
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    /// Registry key of this observation.
    pub fn key(&self) -> (&str, Representation) {
        (&self.type_id, self.representation)
    }

    /// Describe why the payload does not fit the declared representation.
    ///
    /// Returns `None` for well-formed payloads. A null VALUE and an
    /// `UNAVAILABLE` DATA_SET or TABLE are well-formed.
    pub fn payload_issue(&self) -> Option<&'static str> {
        match (self.representation, &self.value) {
            (Representation::Value, ObservationValue::Entries(_)) => {
                Some("map payload for VALUE representation")
            }
            (Representation::Value, v) if v.is_non_finite() => Some("non-finite VALUE"),
            (Representation::Value, _) => None,
            (_, v) if v.is_unavailable() => None,
            (Representation::DataSet, ObservationValue::Entries(entries)) => {
                if entries.iter().all(|(_, v)| is_clean_scalar(v)) {
                    None
                } else {
                    Some("DATA_SET entry is not a finite scalar")
                }
            }
            (Representation::Table, ObservationValue::Entries(rows)) => {
                let well_formed = rows.iter().all(|(_, row)| {
                    row.as_entries()
                        .is_some_and(|cells| cells.iter().all(|(_, v)| is_clean_scalar(v)))
                });
                if well_formed {
                    None
                } else {
                    Some("TABLE row is not a map of finite scalars")
                }
            }
            (Representation::DataSet, _) => Some("DATA_SET payload is not a map"),
            (Representation::Table, _) => Some("TABLE payload is not a map"),
        }
    }
}

fn is_clean_scalar(value: &ObservationValue) -> bool {
    value.is_scalar() && !value.is_non_finite()
}
