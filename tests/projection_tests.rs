// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! End-to-end projection tests over the standard registry.

mod common;

use std::sync::Arc;
use std::thread;

use common::{data_set_obs, mixed_batch, table_obs, value_obs};
use mtconnect_projection::{
    global_registry, project, Entries, Observation, ObservationValue, ProjectionRegistry,
    Projector, Record, Representation,
};

fn values(records: &[Record]) -> Vec<&str> {
    records
        .iter()
        .filter_map(|r| r.value().and_then(ObservationValue::as_str))
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_alarm_value() {
    let observations = vec![value_obs("ALARM", "OVERTRAVEL", 1)];
    let document = project(&observations);

    assert_eq!(document.bucket_names().collect::<Vec<_>>(), vec!["Alarm"]);
    assert_eq!(values(document.records("Alarm").unwrap()), vec!["OVERTRAVEL"]);
    assert!(!document.contains("AlarmDataSet"));
    assert!(!document.contains("AlarmTable"));
}

#[test]
fn test_empty_input() {
    let document = project(&Vec::<Observation>::new());
    assert!(document.is_empty());
    assert_eq!(document.to_json().unwrap(), "{}");
}

#[test]
fn test_program_values_keep_input_order() {
    let observations = vec![value_obs("PROGRAM", "A.NC", 1), value_obs("PROGRAM", "B.NC", 2)];
    let document = project(&observations);

    assert_eq!(document.len(), 1);
    assert_eq!(values(document.records("Program").unwrap()), vec!["A.NC", "B.NC"]);
}

#[test]
fn test_unknown_type_is_skipped() {
    let observations = vec![value_obs("UNKNOWN_TYPE_X", "whatever", 1)];
    let (document, stats) = Projector::default().project_with_stats(&observations);

    assert!(document.is_empty());
    assert_eq!(stats.observed, 1);
    assert_eq!(stats.unmapped, 1);
    assert_eq!(stats.projected, 0);
}

#[test]
fn test_variable_data_set_keeps_entry_order() {
    let observations = vec![data_set_obs(
        "VARIABLE",
        Entries::new().with("temp", 72).with("speed", 1200),
        1,
    )];
    let document = project(&observations);

    let records = document.records("VariableDataSet").unwrap();
    assert_eq!(records.len(), 1);
    let entries = records[0].entries().unwrap();
    assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["temp", "speed"]);
    assert_eq!(entries.get("temp").and_then(ObservationValue::as_i64), Some(72));
    assert!(!document.contains("Variable"));
}

// ============================================================================
// Document Properties
// ============================================================================

#[test]
fn test_no_empty_buckets() {
    let document = project(&mixed_batch());
    for bucket in document.buckets() {
        assert!(!bucket.records().is_empty(), "empty bucket {}", bucket.name());
    }
}

#[test]
fn test_record_count_matches_mapped_observations() {
    let mut observations = mixed_batch();
    observations.push(value_obs("NOT_A_TYPE", "x", 100));
    let (document, stats) = Projector::default().project_with_stats(&observations);

    assert_eq!(stats.observed, observations.len());
    assert_eq!(stats.projected, document.record_count());
    assert_eq!(stats.projected + stats.unmapped, stats.observed);
}

#[test]
fn test_bucket_matches_type_and_representation() {
    let registry = global_registry();
    let document = project(&mixed_batch());

    for bucket in document.buckets() {
        let entry = registry.lookup_bucket(bucket.name()).unwrap();
        assert_eq!(entry.type_id(), bucket.type_id());
        for record in bucket.records() {
            assert_eq!(record.representation(), entry.representation());
        }
    }
}

#[test]
fn test_bucket_order_follows_registry() {
    let document = project(&mixed_batch());
    assert_eq!(
        document.bucket_names().collect::<Vec<_>>(),
        vec!["Alarm", "Execution", "Program", "VariableDataSet", "WorkOffsetTable"]
    );

    // Input order across types does not affect bucket order
    let mut reversed = mixed_batch();
    reversed.reverse();
    let names: Vec<String> = project(&reversed).bucket_names().map(String::from).collect();
    assert_eq!(names, document.bucket_names().collect::<Vec<_>>());
}

#[test]
fn test_relative_order_within_bucket() {
    let document = project(&mixed_batch());
    assert_eq!(
        values(document.records("Execution").unwrap()),
        vec!["ACTIVE", "READY"]
    );
    let sequences: Vec<u64> = document
        .records("Program")
        .unwrap()
        .iter()
        .map(Record::sequence)
        .collect();
    assert_eq!(sequences, vec![1, 6]);
}

#[test]
fn test_projection_is_deterministic() {
    let observations = mixed_batch();
    let first = project(&observations);
    let second = project(&observations);

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_same_type_three_representations() {
    let observations = vec![
        table_obs(
            "ALARM",
            Entries::new().with("a1", Entries::new().with("level", "FAULT")),
            1,
        ),
        value_obs("ALARM", "OVERTRAVEL", 2),
        data_set_obs("ALARM", Entries::new().with("code", 17), 3),
    ];
    let document = project(&observations);

    assert_eq!(
        document.bucket_names().collect::<Vec<_>>(),
        vec!["Alarm", "AlarmDataSet", "AlarmTable"]
    );
    let table = match &document.records("AlarmTable").unwrap()[0] {
        Record::Table(table) => table,
        other => panic!("expected a table record, got {other:?}"),
    };
    assert_eq!(
        table.row("a1").and_then(|row| row.get("level")).and_then(ObservationValue::as_str),
        Some("FAULT")
    );
}

#[test]
fn test_metadata_copied_into_records() {
    let observation = value_obs("CONTROLLER_MODE", "AUTOMATIC", 42)
        .with_name("mode")
        .with_sub_type("ACTUAL");
    let document = project(std::slice::from_ref(&observation));

    let header = document.records("ControllerMode").unwrap()[0].header();
    assert_eq!(header.data_item_id, observation.data_item_id);
    assert_eq!(header.name.as_deref(), Some("mode"));
    assert_eq!(header.sub_type.as_deref(), Some("ACTUAL"));
    assert_eq!(header.sequence, 42);
    assert_eq!(header.timestamp, observation.timestamp);
}

#[test]
fn test_malformed_payload_projects_best_effort() {
    let observations = vec![
        data_set_obs("VARIABLE", Entries::new().with("nested", Entries::new()), 1),
        Observation::new("d_v", "VARIABLE", Representation::DataSet).with_value("UNAVAILABLE"),
        value_obs("BLOCK", ObservationValue::Null, 3),
    ];
    let (document, stats) = Projector::default().project_with_stats(&observations);

    assert_eq!(stats.projected, 3);
    assert_eq!(stats.malformed, 1);
    assert_eq!(document.records("VariableDataSet").unwrap().len(), 2);
    assert_eq!(
        values(document.records("Block").unwrap()),
        vec![mtconnect_projection::core::UNAVAILABLE]
    );
}

#[test]
fn test_non_finite_numbers_project_as_unavailable() {
    let observations = vec![
        value_obs("PART_COUNT", f64::NAN, 1),
        data_set_obs(
            "VARIABLE",
            Entries::new().with("temp", f64::INFINITY).with("speed", 1200),
            2,
        ),
    ];
    let (document, stats) = Projector::default().project_with_stats(&observations);

    assert_eq!(stats.malformed, 2);
    assert_eq!(
        values(document.records("PartCount").unwrap()),
        vec![mtconnect_projection::core::UNAVAILABLE]
    );
    let json = document.to_json().unwrap();
    assert!(!json.contains("null"), "{json}");
    assert!(json.contains(r#""temp":"UNAVAILABLE""#), "{json}");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_projection_shares_registry() {
    let registry = Arc::new(ProjectionRegistry::standard().unwrap());
    let expected = Projector::new(&registry).project(&mixed_batch());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || Projector::new(&registry).project(&mixed_batch()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_global_projection() {
    let expected = project(&mixed_batch());
    let documents: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| project(&mixed_batch())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(documents.iter().all(|d| *d == expected));
}
