//! Storage gateway contract.
//!
//! A unit of work is one long-lived, transactional session owned by the
//! caller for the length of a sync run. Writes issued through it become
//! durable only on [`UnitOfWork::commit`]; a new transaction starts with the
//! next statement after a commit or rollback.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::record::{Filter, Record};

/// Transactional storage session.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Find the first row of `E` matching `filter`.
    async fn find_one<E: Record>(&mut self, filter: Filter) -> DbResult<Option<E>>;

    /// Insert `row` and return its primary key.
    ///
    /// For tables with generated keys the id on `row` is ignored and the
    /// storage-assigned key is returned; otherwise the row's own id is
    /// inserted and echoed back.
    async fn insert<E: Record>(&mut self, row: &E) -> DbResult<i64>;

    /// Overwrite every column of the stored row with the values on `row`.
    async fn update<E: Record>(&mut self, row: &E) -> DbResult<()>;

    /// Push pending writes to storage without ending the transaction, so
    /// that generated keys and inserted rows are visible to later lookups.
    async fn flush(&mut self) -> DbResult<()>;

    /// Make all writes since the last commit durable.
    async fn commit(&mut self) -> DbResult<()>;

    /// Discard all writes since the last commit.
    async fn rollback(&mut self) -> DbResult<()>;
}
