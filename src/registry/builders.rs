// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record builders, one per representation.
//!
//! A builder converts one observation into one record. Builders never fail:
//! a payload that does not match the representation yields a best-effort
//! record (an `UNAVAILABLE` value or empty entries) so that one bad
//! observation cannot abort a projection.

use crate::core::{Entries, ObservationValue, Representation};
use crate::observation::Observation;
use crate::projection::record::{DataSetRecord, Record, RecordHeader, TableRecord, ValueRecord};

/// Converts one observation into one output record.
pub type RecordBuilder = fn(&Observation) -> Record;

/// Build a VALUE record.
///
/// A null, map or non-finite payload is reported as `UNAVAILABLE`.
pub fn build_value_record(observation: &Observation) -> Record {
    let value = match &observation.value {
        ObservationValue::Null | ObservationValue::Entries(_) => ObservationValue::unavailable(),
        scalar => finite_or_unavailable(scalar),
    };
    Record::Value(ValueRecord {
        header: RecordHeader::from_observation(observation),
        value,
    })
}

/// Build a DATA_SET record.
///
/// Entries keep the observation's key order. Nested maps are dropped and
/// non-finite numbers become `UNAVAILABLE`.
pub fn build_data_set_record(observation: &Observation) -> Record {
    let entries = match &observation.value {
        ObservationValue::Entries(entries) => scalar_entries(entries),
        _ => Entries::new(),
    };
    Record::DataSet(DataSetRecord {
        header: RecordHeader::from_observation(observation),
        count: entries.len(),
        entries,
    })
}

/// Build a TABLE record.
///
/// Row order and cell order are preserved. A row that is not a map becomes
/// an empty row.
pub fn build_table_record(observation: &Observation) -> Record {
    let entries = match &observation.value {
        ObservationValue::Entries(rows) => rows
            .iter()
            .map(|(key, row)| {
                let cells = row.as_entries().map(scalar_entries).unwrap_or_default();
                (key, ObservationValue::Entries(cells))
            })
            .collect(),
        _ => Entries::new(),
    };
    Record::Table(TableRecord {
        header: RecordHeader::from_observation(observation),
        count: entries.len(),
        entries,
    })
}

fn scalar_entries(entries: &Entries) -> Entries {
    entries
        .iter()
        .filter(|(_, v)| v.is_scalar())
        .map(|(k, v)| (k, finite_or_unavailable(v)))
        .collect()
}

fn finite_or_unavailable(value: &ObservationValue) -> ObservationValue {
    if value.is_non_finite() {
        ObservationValue::unavailable()
    } else {
        value.clone()
    }
}

/// Set of record builders indexed by representation.
///
/// The registry picks the builder for each declared bucket from this set.
#[derive(Debug, Clone, Copy)]
pub struct BuilderSet {
    builders: [Option<RecordBuilder>; 3],
}

impl BuilderSet {
    /// Builders for all three representations.
    pub fn standard() -> Self {
        Self {
            builders: [
                Some(build_value_record as RecordBuilder),
                Some(build_data_set_record as RecordBuilder),
                Some(build_table_record as RecordBuilder),
            ],
        }
    }

    /// A set with no builders.
    pub fn empty() -> Self {
        Self {
            builders: [None; 3],
        }
    }

    /// Replace the builder for a representation.
    pub fn with(mut self, representation: Representation, builder: RecordBuilder) -> Self {
        self.builders[slot(representation)] = Some(builder);
        self
    }

    /// Remove the builder for a representation.
    pub fn without(mut self, representation: Representation) -> Self {
        self.builders[slot(representation)] = None;
        self
    }

    /// Get the builder for a representation.
    pub fn get(&self, representation: Representation) -> Option<RecordBuilder> {
        self.builders[slot(representation)]
    }
}

impl Default for BuilderSet {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn slot(representation: Representation) -> usize {
    match representation {
        Representation::Value => 0,
        Representation::DataSet => 1,
        Representation::Table => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_builder() {
        let obs = Observation::new("a1", "ALARM", Representation::Value).with_value("OVERTRAVEL");
        let record = build_value_record(&obs);
        assert_eq!(record.value(), Some(&ObservationValue::from("OVERTRAVEL")));
        assert_eq!(record.header().data_item_id, "a1");
    }

    #[test]
    fn test_value_builder_null_is_unavailable() {
        let obs = Observation::new("a1", "ALARM", Representation::Value);
        let record = build_value_record(&obs);
        assert!(record.value().is_some_and(ObservationValue::is_unavailable));
    }

    #[test]
    fn test_non_finite_numbers_are_unavailable() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let obs = Observation::new("l1", "LOAD", Representation::Value).with_value(bad);
            assert!(build_value_record(&obs)
                .value()
                .is_some_and(ObservationValue::is_unavailable));
        }

        let obs = Observation::new("v1", "VARIABLE", Representation::DataSet)
            .with_value(Entries::new().with("ok", 1.5).with("bad", f64::NAN));
        let record = build_data_set_record(&obs);
        let entries = record.entries().unwrap();
        assert_eq!(entries.get("ok"), Some(&ObservationValue::Float(1.5)));
        assert!(entries.get("bad").is_some_and(ObservationValue::is_unavailable));

        let obs = Observation::new("t1", "TOOL_OFFSET", Representation::Table)
            .with_value(Entries::new().with("r1", Entries::new().with("x", f64::INFINITY)));
        let Record::Table(table) = build_table_record(&obs) else {
            panic!("expected table record");
        };
        assert!(table
            .row("r1")
            .and_then(|row| row.get("x"))
            .is_some_and(ObservationValue::is_unavailable));
    }

    #[test]
    fn test_data_set_builder_preserves_order() {
        let obs = Observation::new("v1", "VARIABLE", Representation::DataSet)
            .with_value(Entries::new().with("b", 2).with("a", 1));
        let record = build_data_set_record(&obs);
        let Record::DataSet(ds) = record else {
            panic!("expected data set record");
        };
        assert_eq!(ds.count, 2);
        assert_eq!(ds.entries.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_data_set_builder_malformed_payload() {
        let obs = Observation::new("v1", "VARIABLE", Representation::DataSet).with_value(5);
        let Record::DataSet(ds) = build_data_set_record(&obs) else {
            panic!("expected data set record");
        };
        assert_eq!(ds.count, 0);
        assert!(ds.entries.is_empty());

        let nested = Observation::new("v1", "VARIABLE", Representation::DataSet).with_value(
            Entries::new()
                .with("ok", 1)
                .with("bad", Entries::new().with("x", 1)),
        );
        let Record::DataSet(ds) = build_data_set_record(&nested) else {
            panic!("expected data set record");
        };
        assert_eq!(ds.entries.keys().collect::<Vec<_>>(), vec!["ok"]);
    }

    #[test]
    fn test_table_builder() {
        let obs = Observation::new("t1", "TOOL_OFFSET", Representation::Table).with_value(
            Entries::new()
                .with("r2", Entries::new().with("y", 2).with("x", 1))
                .with("r1", 7),
        );
        let Record::Table(table) = build_table_record(&obs) else {
            panic!("expected table record");
        };
        assert_eq!(table.count, 2);
        let rows: Vec<_> = table.rows().map(|(k, r)| (k, r.len())).collect();
        assert_eq!(rows, vec![("r2", 2), ("r1", 0)]);
        assert_eq!(
            table.row("r2").unwrap().keys().collect::<Vec<_>>(),
            vec!["y", "x"]
        );
    }

    #[test]
    fn test_builder_set() {
        let set = BuilderSet::standard().without(Representation::Table);
        assert!(set.get(Representation::Value).is_some());
        assert!(set.get(Representation::Table).is_none());
        assert!(BuilderSet::empty().get(Representation::DataSet).is_none());
    }
}
