// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for the projection engine.
//!
//! Two families of errors exist:
//! - Configuration errors raised while building a registry. These indicate a
//!   defect in the projection table and abort startup.
//! - Input errors raised while reading observation streams or documents.
//!
//! Unmapped or malformed observations are never errors; projection skips or
//! degrades them and keeps going.

use std::fmt;

use super::Representation;

/// Errors that can occur while building registries or reading input.
#[derive(Debug, Clone)]
pub enum ProjectionError {
    /// The same (type, representation) key was registered twice
    DuplicateRegistration {
        /// Data item type identifier
        type_id: String,
        /// Representation of the duplicate key
        representation: Representation,
    },

    /// Two registry keys map to the same bucket name
    DuplicateBucket {
        /// Bucket name that collided
        bucket: String,
        /// Type identifier of the second registration
        type_id: String,
    },

    /// Bucket name is empty or not a valid field name
    InvalidBucketName {
        /// Offending bucket name
        bucket: String,
        /// Why it was rejected
        reason: String,
    },

    /// No record builder is available for a declared representation
    MissingBuilder {
        /// Bucket that was being declared
        bucket: String,
        /// Representation without a builder
        representation: Representation,
    },

    /// Invalid type exclusion pattern
    InvalidPattern {
        /// The wildcard pattern
        pattern: String,
        /// Compilation error
        reason: String,
    },

    /// Parse error in an observation stream or document
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// I/O error while reading input
    Io {
        /// Error message
        message: String,
    },
}

impl ProjectionError {
    /// Create a duplicate registration error.
    pub fn duplicate_registration(type_id: impl Into<String>, representation: Representation) -> Self {
        ProjectionError::DuplicateRegistration {
            type_id: type_id.into(),
            representation,
        }
    }

    /// Create a duplicate bucket error.
    pub fn duplicate_bucket(bucket: impl Into<String>, type_id: impl Into<String>) -> Self {
        ProjectionError::DuplicateBucket {
            bucket: bucket.into(),
            type_id: type_id.into(),
        }
    }

    /// Create an invalid bucket name error.
    pub fn invalid_bucket_name(bucket: impl Into<String>, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidBucketName {
            bucket: bucket.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing builder error.
    pub fn missing_builder(bucket: impl Into<String>, representation: Representation) -> Self {
        ProjectionError::MissingBuilder {
            bucket: bucket.into(),
            representation,
        }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        ProjectionError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Check if this error comes from registry construction.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            ProjectionError::ParseError { .. } | ProjectionError::Io { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ProjectionError::DuplicateRegistration {
                type_id,
                representation,
            } => vec![
                ("type", type_id.clone()),
                ("representation", representation.to_string()),
            ],
            ProjectionError::DuplicateBucket { bucket, type_id } => {
                vec![("bucket", bucket.clone()), ("type", type_id.clone())]
            }
            ProjectionError::InvalidBucketName { bucket, reason } => {
                vec![("bucket", bucket.clone()), ("reason", reason.clone())]
            }
            ProjectionError::MissingBuilder {
                bucket,
                representation,
            } => vec![
                ("bucket", bucket.clone()),
                ("representation", representation.to_string()),
            ],
            ProjectionError::InvalidPattern { pattern, reason } => {
                vec![("pattern", pattern.clone()), ("reason", reason.clone())]
            }
            ProjectionError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            ProjectionError::Io { message } => vec![("message", message.clone())],
        }
    }
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::DuplicateRegistration {
                type_id,
                representation,
            } => write!(
                f,
                "Duplicate registration for type '{type_id}' with representation {representation}"
            ),
            ProjectionError::DuplicateBucket { bucket, type_id } => write!(
                f,
                "Bucket '{bucket}' is already registered (while declaring type '{type_id}')"
            ),
            ProjectionError::InvalidBucketName { bucket, reason } => {
                write!(f, "Invalid bucket name '{bucket}': {reason}")
            }
            ProjectionError::MissingBuilder {
                bucket,
                representation,
            } => write!(
                f,
                "No record builder for representation {representation} (bucket '{bucket}')"
            ),
            ProjectionError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid type pattern '{pattern}': {reason}")
            }
            ProjectionError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            ProjectionError::Io { message } => write!(f, "IO error: {message}"),
        }
    }
}

impl std::error::Error for ProjectionError {}

impl From<std::io::Error> for ProjectionError {
    fn from(err: std::io::Error) -> Self {
        ProjectionError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_registration_error() {
        let err = ProjectionError::duplicate_registration("ALARM", Representation::DataSet);
        assert!(matches!(err, ProjectionError::DuplicateRegistration { .. }));
        assert_eq!(
            err.to_string(),
            "Duplicate registration for type 'ALARM' with representation DATA_SET"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_duplicate_bucket_error() {
        let err = ProjectionError::duplicate_bucket("Alarm", "ALARM_2");
        assert_eq!(
            err.to_string(),
            "Bucket 'Alarm' is already registered (while declaring type 'ALARM_2')"
        );
    }

    #[test]
    fn test_invalid_bucket_name_error() {
        let err = ProjectionError::invalid_bucket_name("", "empty name");
        assert_eq!(err.to_string(), "Invalid bucket name '': empty name");
    }

    #[test]
    fn test_missing_builder_error() {
        let err = ProjectionError::missing_builder("AlarmTable", Representation::Table);
        assert_eq!(
            err.to_string(),
            "No record builder for representation TABLE (bucket 'AlarmTable')"
        );
    }

    #[test]
    fn test_parse_error_is_not_configuration() {
        let err = ProjectionError::parse("observations", "expected value");
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "Parse error in observations: expected value");
    }

    #[test]
    fn test_log_fields_duplicate_registration() {
        let err = ProjectionError::duplicate_registration("PROGRAM", Representation::Value);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("type", "PROGRAM".to_string()));
        assert_eq!(fields[1], ("representation", "VALUE".to_string()));
    }

    #[test]
    fn test_log_fields_invalid_pattern() {
        let err = ProjectionError::invalid_pattern("PART_(", "unclosed group");
        let fields = err.log_fields();
        assert_eq!(fields[0], ("pattern", "PART_(".to_string()));
        assert_eq!(fields[1], ("reason", "unclosed group".to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProjectionError = io_err.into();
        assert!(matches!(err, ProjectionError::Io { .. }));
        assert_eq!(err.to_string(), "IO error: file not found");
    }
}
