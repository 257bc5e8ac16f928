// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Document serialization and flattening tests.

mod common;

use common::{data_set_obs, mixed_batch, value_obs};
use mtconnect_projection::core::UNAVAILABLE;
use mtconnect_projection::{
    global_registry, project, Entries, ObservationValue, OutputDocument, ProjectionError,
    ProjectionRegistry, Record,
};

#[test]
fn test_document_json_layout() {
    let observations = vec![
        value_obs("PROGRAM", "A.NC", 1),
        data_set_obs("VARIABLE", Entries::new().with("temp", 72).with("speed", 1200), 2),
    ];
    let json: serde_json::Value = serde_json::from_str(&project(&observations).to_json().unwrap()).unwrap();

    let program = &json["Program"][0];
    assert_eq!(program["dataItemId"], "d_program");
    assert_eq!(program["sequence"], 1);
    assert_eq!(program["value"], "A.NC");

    let variables = &json["VariableDataSet"][0];
    assert_eq!(variables["count"], 2);
    assert_eq!(variables["entries"]["speed"], 1200);
}

#[test]
fn test_document_json_key_order() {
    let text = project(&mixed_batch()).to_json().unwrap();
    let alarm = text.find("\"Alarm\"").unwrap();
    let execution = text.find("\"Execution\"").unwrap();
    let work_offset = text.find("\"WorkOffsetTable\"").unwrap();
    assert!(alarm < execution && execution < work_offset);

    // Entry order survives serialization
    assert!(text.find("\"temp\"").unwrap() < text.find("\"speed\"").unwrap());
}

#[test]
fn test_from_json_round_trip() {
    let document = project(&mixed_batch());
    let parsed = OutputDocument::from_json(&document.to_json_pretty().unwrap(), global_registry()).unwrap();
    assert_eq!(parsed, document);
}

#[test]
fn test_flatten_reprojects_to_same_document() {
    let document = project(&mixed_batch());
    let observations = document.to_observations();
    assert_eq!(observations.len(), document.record_count());
    assert_eq!(project(&observations), document);
}

#[test]
fn test_from_json_empty_document() {
    let document = OutputDocument::from_json("{}", global_registry()).unwrap();
    assert!(document.is_empty());
}

#[test]
fn test_from_json_with_custom_registry() {
    let registry = ProjectionRegistry::builder()
        .declare("SPINDLE_PROFILE", mtconnect_projection::Representation::Table, "SpindleProfileTable")
        .unwrap()
        .build();
    let json = r#"{
        "Alarm": [{"dataItemId": "a", "sequence": 1, "timestamp": "2026-03-01T12:00:00Z", "value": "X"}],
        "SpindleProfileTable": [{
            "dataItemId": "sp", "sequence": 2, "timestamp": "2026-03-01T12:00:00Z",
            "count": 1, "entries": {"low": {"rpm": 800}}
        }]
    }"#;
    let document = OutputDocument::from_json(json, &registry).unwrap();

    assert_eq!(document.bucket_names().collect::<Vec<_>>(), vec!["SpindleProfileTable"]);
    let observations = document.to_observations();
    assert_eq!(observations[0].type_id, "SPINDLE_PROFILE");
}

#[test]
fn test_from_json_errors() {
    for bad in ["[]", "{\"Alarm\": 3}", "{} trailing", "{\"Alarm\": [{\"value\": \"X\"}]}"] {
        let err = OutputDocument::from_json(bad, global_registry()).unwrap_err();
        assert!(
            matches!(err, ProjectionError::ParseError { .. }),
            "unexpected error for {bad}: {err}"
        );
    }
}

#[test]
fn test_from_json_normalizes_record_shapes() {
    let json = r#"{
        "Alarm": [{"dataItemId": "a", "sequence": 1, "timestamp": "2026-03-01T12:00:00Z",
                   "value": {"x": 1}}],
        "Program": [{"dataItemId": "p", "sequence": 2, "timestamp": "2026-03-01T12:00:00Z"}],
        "VariableDataSet": [{"dataItemId": "v", "sequence": 3, "timestamp": "2026-03-01T12:00:00Z",
                             "count": 9, "entries": {"a": {"nested": 1}, "b": 2}}]
    }"#;
    let parsed = OutputDocument::from_json(json, global_registry()).unwrap();

    let unavailable = ObservationValue::from(UNAVAILABLE);
    assert_eq!(parsed.records("Alarm").unwrap()[0].value(), Some(&unavailable));
    assert_eq!(parsed.records("Program").unwrap()[0].value(), Some(&unavailable));

    let Record::DataSet(data_set) = &parsed.records("VariableDataSet").unwrap()[0] else {
        panic!("expected a data set record");
    };
    assert_eq!(data_set.count, 1);
    assert_eq!(data_set.entries.keys().collect::<Vec<_>>(), vec!["b"]);

    // Parsed documents are stable under flatten and re-projection
    assert_eq!(project(&parsed.to_observations()), parsed);
}

#[test]
fn test_from_json_recomputes_table_count() {
    let json = r#"{"WorkOffsetTable": [{
        "dataItemId": "w", "sequence": 1, "timestamp": "2026-03-01T12:00:00Z",
        "count": 0, "entries": {"G54": {"X": 1.5}, "G55": 4}
    }]}"#;
    let parsed = OutputDocument::from_json(json, global_registry()).unwrap();

    let Record::Table(table) = &parsed.records("WorkOffsetTable").unwrap()[0] else {
        panic!("expected a table record");
    };
    assert_eq!(table.count, 2);
    assert!(table.row("G55").is_some_and(Entries::is_empty));
}
