// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Observation-to-document projection.
//!
//! - [`engine`] partitions observations by registry entry
//! - [`document`] assembles partitions into an [`OutputDocument`] and handles
//!   its JSON form
//! - [`record`] defines the per-representation record shapes
//!
//! # Example
//!
//! ```
//! use mtconnect_projection::core::Representation;
//! use mtconnect_projection::projection::project;
//! use mtconnect_projection::Observation;
//!
//! let observations = vec![
//!     Observation::new("p1", "PROGRAM", Representation::Value).with_value("A.NC"),
//!     Observation::new("p1", "PROGRAM", Representation::Value).with_value("B.NC"),
//! ];
//! let document = project(&observations);
//! assert_eq!(document.records("Program").map(|r| r.len()), Some(2));
//! ```

pub mod document;
pub mod engine;
pub mod record;

pub use document::{assemble, Bucket, DocumentSeed, OutputDocument};
pub use engine::{project, project_with, Partitions, ProjectionStats, Projector};
pub use record::{DataSetRecord, Record, RecordHeader, TableRecord, ValueRecord};
