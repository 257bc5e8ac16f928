// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Output records, one per projected observation.
//!
//! Each representation has its own record shape. All of them carry the same
//! [`RecordHeader`] metadata, flattened into the record when serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Entries, ObservationValue, Representation};
use crate::observation::Observation;

/// Observation metadata copied unchanged into every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeader {
    pub data_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_triggered: Option<String>,
}

impl RecordHeader {
    /// Copy the metadata of an observation.
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            data_item_id: observation.data_item_id.clone(),
            name: observation.name.clone(),
            sequence: observation.sequence,
            timestamp: observation.timestamp,
            sub_type: observation.sub_type.clone(),
            composition_id: observation.composition_id.clone(),
            reset_triggered: observation.reset_triggered.clone(),
        }
    }
}

/// Record for a VALUE observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    #[serde(flatten)]
    pub header: RecordHeader,
    /// Scalar result
    #[serde(default)]
    pub value: ObservationValue,
}

/// Record for a DATA_SET observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSetRecord {
    #[serde(flatten)]
    pub header: RecordHeader,
    /// Number of entries
    #[serde(default)]
    pub count: usize,
    /// Key -> scalar, in device order
    #[serde(default)]
    pub entries: Entries,
}

/// Record for a TABLE observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    #[serde(flatten)]
    pub header: RecordHeader,
    /// Number of rows
    #[serde(default)]
    pub count: usize,
    /// Row key -> row entries, in device order at both levels
    #[serde(default)]
    pub entries: Entries,
}

impl TableRecord {
    /// Look up a row by key.
    pub fn row(&self, key: &str) -> Option<&Entries> {
        self.entries.get(key).and_then(ObservationValue::as_entries)
    }

    /// Iterate over rows in order. Rows that are not maps are skipped.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &Entries)> {
        self.entries
            .iter()
            .filter_map(|(key, row)| row.as_entries().map(|cells| (key, cells)))
    }
}

/// A projected record, tagged by representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Value(ValueRecord),
    DataSet(DataSetRecord),
    Table(TableRecord),
}

impl Record {
    /// Metadata shared by all record shapes.
    pub fn header(&self) -> &RecordHeader {
        match self {
            Record::Value(r) => &r.header,
            Record::DataSet(r) => &r.header,
            Record::Table(r) => &r.header,
        }
    }

    /// Representation of this record.
    pub fn representation(&self) -> Representation {
        match self {
            Record::Value(_) => Representation::Value,
            Record::DataSet(_) => Representation::DataSet,
            Record::Table(_) => Representation::Table,
        }
    }

    /// Sequence number of the source observation.
    pub fn sequence(&self) -> u64 {
        self.header().sequence
    }

    /// Scalar value, for VALUE records.
    pub fn value(&self) -> Option<&ObservationValue> {
        match self {
            Record::Value(r) => Some(&r.value),
            _ => None,
        }
    }

    /// Entries, for DATA_SET and TABLE records.
    pub fn entries(&self) -> Option<&Entries> {
        match self {
            Record::Value(_) => None,
            Record::DataSet(r) => Some(&r.entries),
            Record::Table(r) => Some(&r.entries),
        }
    }

    /// Rebuild the observation this record was projected from.
    pub fn to_observation(&self, type_id: &str) -> Observation {
        let header = self.header().clone();
        let value = match self {
            Record::Value(r) => r.value.clone(),
            Record::DataSet(r) => ObservationValue::Entries(r.entries.clone()),
            Record::Table(r) => ObservationValue::Entries(r.entries.clone()),
        };
        Observation {
            data_item_id: header.data_item_id,
            name: header.name,
            type_id: type_id.to_string(),
            sub_type: header.sub_type,
            representation: self.representation(),
            timestamp: header.timestamp,
            sequence: header.sequence,
            composition_id: header.composition_id,
            reset_triggered: header.reset_triggered,
            value,
        }
    }
}

impl From<ValueRecord> for Record {
    fn from(r: ValueRecord) -> Self {
        Record::Value(r)
    }
}

impl From<DataSetRecord> for Record {
    fn from(r: DataSetRecord) -> Self {
        Record::DataSet(r)
    }
}

impl From<TableRecord> for Record {
    fn from(r: TableRecord) -> Self {
        Record::Table(r)
    }
}
