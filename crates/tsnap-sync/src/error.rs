//! Sync error types.

use thiserror::Error;
use tsnap_db::DbError;

/// Result type alias using `SyncError`.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort reconciliation of one top-level record.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Storage rejected a read or write.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// A new row needs a column the payload does not supply.
    #[error("Missing required field {entity}.{field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// The payload sets a required column to null.
    #[error("Field {entity}.{field} cannot be null")]
    NullField {
        entity: &'static str,
        field: &'static str,
    },

    /// A stored foreign key points at a row that does not exist.
    #[error("{entity} {id} referenced but not found")]
    DanglingReference { entity: &'static str, id: i64 },

    /// The requested reporting period is not valid.
    #[error("Invalid reporting period: {message}")]
    InvalidPeriod { message: String },
}

impl SyncError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(entity: &'static str, field: &'static str) -> Self {
        Self::MissingField { entity, field }
    }

    /// Create a null field error.
    #[must_use]
    pub fn null_field(entity: &'static str, field: &'static str) -> Self {
        Self::NullField { entity, field }
    }

    /// Create a dangling reference error.
    #[must_use]
    pub fn dangling_reference(entity: &'static str, id: i64) -> Self {
        Self::DanglingReference { entity, id }
    }

    /// Create an invalid period error.
    pub fn invalid_period(message: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            message: message.into(),
        }
    }

    /// Check if this error came from storage rather than from the payload.
    #[must_use]
    pub fn is_database(&self) -> bool {
        matches!(self, SyncError::Database(_))
    }
}
