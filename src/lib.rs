// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # MTConnect Projection
//!
//! Projects MTConnect Event observations into the flat bucket layout of an
//! agent's Events document.
//!
//! Every Event type (Alarm, ControllerMode, ToolId, ...) is reported in one
//! of three representations (VALUE, DATA_SET, TABLE), and each
//! `(type, representation)` pair owns a bucket with a published field name
//! (`Alarm`, `AlarmDataSet`, `AlarmTable`). A single data-driven registry
//! holds these associations; projection is one dispatch loop over it.
//!
//! ## Architecture
//!
//! - `core/` - Value model, representation enum, errors
//! - `registry/` - Projection registry, event vocabulary, record builders
//! - `projection/` - Partition engine, records, document assembly
//! - `io/` - JSON observation streams
//! - `config` - TOML registry configuration
//!
//! ## Guarantees
//!
//! - Records keep arrival order within a bucket.
//! - Buckets appear in registry order; empty buckets are absent.
//! - Observations without a registry entry are skipped, never an error.
//!
//! ## Example
//!
//! ```rust
//! use mtconnect_projection::core::{Entries, Representation};
//! use mtconnect_projection::{global_registry, Observation, Projector};
//!
//! let observations = vec![
//!     Observation::new("alarm1", "ALARM", Representation::Value).with_value("OVERTRAVEL"),
//!     Observation::new("vars", "VARIABLE", Representation::DataSet)
//!         .with_value(Entries::new().with("temp", 72).with("speed", 1200)),
//! ];
//!
//! let document = Projector::new(global_registry()).project(&observations);
//! let names: Vec<_> = document.bucket_names().collect();
//! assert_eq!(names, vec!["Alarm", "VariableDataSet"]);
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{Entries, ObservationValue, ProjectionError, Representation, Result};

// Input records
pub mod observation;

pub use observation::Observation;

// Registry, vocabulary and record builders
pub mod registry;

pub use registry::{global_registry, ProjectionEntry, ProjectionRegistry, RegistryBuilder};

// Projection engine and documents
pub mod projection;

pub use projection::{project, OutputDocument, ProjectionStats, Projector, Record};

// Configuration
pub mod config;

pub use config::{ConfigError, ProjectionConfig};

// Observation stream I/O
pub mod io;
