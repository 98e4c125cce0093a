//! Connection pool wrapper.

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::DbError;

/// Postgres connection pool shared by the units of work of one process.
#[derive(Debug, Clone)]
pub struct DbPool {
    inner: PgPool,
}

impl DbPool {
    /// Connect to the database at `url` with at most `max_connections`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DbError> {
        let inner = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        tracing::debug!(max_connections, "Database pool connected");
        Ok(Self { inner })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(inner: PgPool) -> Self {
        Self { inner }
    }

    /// Access the underlying `SQLx` pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.inner
    }

    /// Close every connection in the pool.
    pub async fn close(&self) {
        self.inner.close().await;
    }
}
