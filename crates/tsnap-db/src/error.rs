//! Error types for the tsnap-db crate.
//!
//! Provides a unified error type that wraps `SQLx` errors with the table they
//! were raised for.

use thiserror::Error;

/// Result type alias using `DbError`.
pub type DbResult<T> = Result<T, DbError>;

/// Database operation errors.
///
/// # Example
///
/// ```rust
/// use tsnap_db::DbError;
///
/// fn handle_error(err: DbError) {
///     match err {
///         DbError::ConnectionFailed(e) => eprintln!("Cannot connect: {}", e),
///         DbError::MigrationFailed(e) => eprintln!("Migration error: {}", e),
///         DbError::QueryFailed { table, source } => eprintln!("{table}: {source}"),
///         DbError::ConstraintViolation { table, message } => eprintln!("{table}: {message}"),
///         DbError::NotPersisted { table } => eprintln!("{table} row has no id"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish a connection or begin a transaction.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A statement failed to execute.
    #[error("Query on {table} failed: {source}")]
    QueryFailed {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A unique, foreign-key, not-null or check constraint rejected a write.
    #[error("Constraint violation on {table}: {message}")]
    ConstraintViolation { table: &'static str, message: String },

    /// An update was requested for a row that was never inserted.
    #[error("Row in {table} has no identity and cannot be updated")]
    NotPersisted { table: &'static str },
}

impl DbError {
    /// Classify an `SQLx` error raised while touching `table`.
    ///
    /// Constraint rejections are reported separately from other query
    /// failures so callers can log them with the offending table.
    #[must_use]
    pub fn from_query(table: &'static str, source: sqlx::Error) -> Self {
        let violation = source.as_database_error().and_then(|db_err| {
            matches!(
                db_err.kind(),
                sqlx::error::ErrorKind::UniqueViolation
                    | sqlx::error::ErrorKind::ForeignKeyViolation
                    | sqlx::error::ErrorKind::NotNullViolation
                    | sqlx::error::ErrorKind::CheckViolation
            )
            .then(|| db_err.message().to_string())
        });

        match violation {
            Some(message) => DbError::ConstraintViolation { table, message },
            None => DbError::QueryFailed { table, source },
        }
    }

    /// Check if this error indicates a connection problem.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
    }

    /// Check if this error indicates a rejected write.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DbError::ConstraintViolation { .. })
    }
}
