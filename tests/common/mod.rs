// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use mtconnect_projection::{Entries, Observation, ObservationValue, Representation};

// ============================================================================
// Observation Builders
// ============================================================================

/// Fixed timestamp so records compare equal across runs.
pub fn timestamp(sequence: u64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(sequence as i64)
}

/// A VALUE observation.
pub fn value_obs(type_id: &str, value: impl Into<ObservationValue>, sequence: u64) -> Observation {
    Observation::new(format!("d_{}", type_id.to_lowercase()), type_id, Representation::Value)
        .with_value(value)
        .with_sequence(sequence)
        .with_timestamp(timestamp(sequence))
}

/// A DATA_SET observation.
pub fn data_set_obs(type_id: &str, entries: Entries, sequence: u64) -> Observation {
    Observation::new(
        format!("d_{}_ds", type_id.to_lowercase()),
        type_id,
        Representation::DataSet,
    )
    .with_value(entries)
    .with_sequence(sequence)
    .with_timestamp(timestamp(sequence))
}

/// A TABLE observation.
pub fn table_obs(type_id: &str, rows: Entries, sequence: u64) -> Observation {
    Observation::new(
        format!("d_{}_tbl", type_id.to_lowercase()),
        type_id,
        Representation::Table,
    )
    .with_value(rows)
    .with_sequence(sequence)
    .with_timestamp(timestamp(sequence))
}

/// A mixed batch touching several types and all three representations.
pub fn mixed_batch() -> Vec<Observation> {
    vec![
        value_obs("PROGRAM", "O1000.NC", 1),
        value_obs("EXECUTION", "ACTIVE", 2),
        data_set_obs(
            "VARIABLE",
            Entries::new().with("temp", 72).with("speed", 1200),
            3,
        ),
        value_obs("ALARM", "OVERTRAVEL", 4),
        table_obs(
            "WORK_OFFSET",
            Entries::new()
                .with("G54", Entries::new().with("X", 1.5).with("Y", -2.0))
                .with("G55", Entries::new().with("X", 0.0)),
            5,
        ),
        value_obs("PROGRAM", "O2000.NC", 6),
        value_obs("EXECUTION", "READY", 7),
    ]
}

// ============================================================================
// Temporary Files
// ============================================================================

/// Unique temporary directory for one test.
pub fn temp_dir(prefix: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let dir = std::env::temp_dir().join(format!(
        "mtcproject_{}_{}_{}",
        prefix,
        std::process::id(),
        random
    ));
    fs::create_dir_all(&dir).unwrap();
    (dir.clone(), CleanupGuard(dir))
}

/// Cleanup guard for test temporary files
#[derive(Debug)]
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Get the path to a test fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}
