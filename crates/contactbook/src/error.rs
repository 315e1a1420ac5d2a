//! Error types for contactbook.
//!
//! This module defines all error types used throughout the contactbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::{Field, RecordId};

/// The main error type for contactbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The persisted slot holds content that is not a record list.
    #[error("slot '{key}' holds malformed data: {source}")]
    CorruptSlot {
        /// Key of the slot that failed to parse.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Form Errors ===
    /// A submit was attempted with one or more blank fields.
    #[error("please fill all fields before submitting (missing: {})", join_fields(.missing))]
    IncompleteForm {
        /// Fields that failed the presence check.
        missing: Vec<Field>,
    },

    /// A field name did not match any record field.
    #[error("unknown field '{0}' (expected firstName, lastName or phone)")]
    UnknownField(String),

    // === Selection Errors ===
    /// No record with the given id exists in the store.
    #[error("no record with id {0}")]
    RecordNotFound(RecordId),

    /// A listing position was outside the displayed list.
    #[error("position {position} is out of range (listing has {len} entries)")]
    PositionOutOfRange {
        /// The 1-based position that was requested.
        position: usize,
        /// Number of entries in the listing.
        len: usize,
    },

    /// A record selector was neither a position nor a record id.
    #[error("invalid record selector '{0}': expected a position or a record id")]
    InvalidSelector(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The interactive line editor failed.
    #[error("line editor error: {0}")]
    LineEditor(#[from] rustyline::error::ReadlineError),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Create a corrupt slot error.
    #[must_use]
    pub fn corrupt_slot(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CorruptSlot {
            key: key.into(),
            source,
        }
    }

    /// Check if this error is a failed presence check on submit.
    #[must_use]
    pub fn is_incomplete_form(&self) -> bool {
        matches!(self, Self::IncompleteForm { .. })
    }

    /// Check if this error means the user picked a record that isn't there.
    #[must_use]
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound(_) | Self::PositionOutOfRange { .. } | Self::InvalidSelector(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_form_display() {
        let err = Error::IncompleteForm {
            missing: vec![Field::LastName, Field::Phone],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("please fill all fields before submitting"));
        assert!(msg.contains("lastName, phone"));
        assert!(err.is_incomplete_form());
    }

    #[test]
    fn test_unknown_field_display() {
        let err = Error::UnknownField("email".to_string());
        assert!(err.to_string().contains("'email'"));
        assert!(!err.is_incomplete_form());
    }

    #[test]
    fn test_selection_errors() {
        assert!(Error::RecordNotFound(RecordId::new()).is_selection_error());
        assert!(Error::PositionOutOfRange {
            position: 4,
            len: 2
        }
        .is_selection_error());
        assert!(Error::InvalidSelector("x".to_string()).is_selection_error());
        assert!(!Error::UnknownField("x".to_string()).is_selection_error());
    }

    #[test]
    fn test_position_out_of_range_display() {
        let err = Error::PositionOutOfRange {
            position: 7,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "position 7 is out of range (listing has 3 entries)"
        );
    }

    #[test]
    fn test_corrupt_slot_display() {
        let source = serde_json::from_str::<Vec<i32>>("{not json").unwrap_err();
        let err = Error::corrupt_slot("users", source);
        assert!(err.to_string().contains("slot 'users'"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "slot_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("slot_key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
