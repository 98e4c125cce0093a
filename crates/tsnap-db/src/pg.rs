//! Postgres unit of work.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Transaction};
use tracing::{debug, instrument, trace};

use crate::error::{DbError, DbResult};
use crate::pool::DbPool;
use crate::record::{Filter, Record, Value};
use crate::unit_of_work::UnitOfWork;

/// Unit of work over a Postgres connection pool.
///
/// A transaction is begun lazily on the first statement and held until
/// [`UnitOfWork::commit`] or [`UnitOfWork::rollback`]. Statements are sent as
/// they are issued, so inserted rows and generated keys are visible inside
/// the transaction immediately and `flush` has nothing to push.
pub struct PgUnitOfWork {
    pool: DbPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl std::fmt::Debug for PgUnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUnitOfWork")
            .field("in_transaction", &self.tx.is_some())
            .finish()
    }
}

impl PgUnitOfWork {
    /// Create a unit of work that draws its connection from `pool`.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool, tx: None }
    }

    /// Whether a transaction is currently open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    async fn transaction(&mut self) -> DbResult<&mut Transaction<'static, Postgres>> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => {
                trace!("Beginning transaction");
                self.pool
                    .inner()
                    .begin()
                    .await
                    .map_err(DbError::ConnectionFailed)?
            }
        };
        Ok(self.tx.insert(tx))
    }
}

/// Append `"column"` with identifier quoting.
fn push_column(qb: &mut QueryBuilder<'_, Postgres>, column: &str) {
    qb.push("\"").push(column).push("\"");
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: Value) {
    match value {
        Value::Int(v) => qb.push_bind(v),
        Value::BigInt(v) => qb.push_bind(v),
        Value::Float(v) => qb.push_bind(v),
        Value::Bool(v) => qb.push_bind(v),
        Value::Text(v) => qb.push_bind(v),
        Value::Date(v) => qb.push_bind(v),
    };
}

fn select_query<'a>(table: &str, filter: Filter) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM \"{table}\" WHERE "));
    push_column(&mut qb, filter.column);
    qb.push(" = ");
    push_value(&mut qb, filter.value);
    qb.push(" ORDER BY \"id\" LIMIT 1");
    qb
}

fn insert_query<'a, E: Record>(row: &E) -> QueryBuilder<'a, Postgres> {
    let mut columns = row.columns();
    if !E::GENERATED_ID {
        columns.insert(0, ("id", Value::BigInt(row.id())));
    }

    let mut qb = QueryBuilder::new(format!("INSERT INTO \"{}\" (", E::TABLE));
    for (i, (column, _)) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_column(&mut qb, column);
    }
    qb.push(") VALUES (");
    for (i, (_, value)) in columns.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(&mut qb, value);
    }
    qb.push(") RETURNING \"id\"");
    qb
}

fn update_query<'a, E: Record>(id: i64, row: &E) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE \"{}\" SET ", E::TABLE));
    for (i, (column, value)) in row.columns().into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_column(&mut qb, column);
        qb.push(" = ");
        push_value(&mut qb, value);
    }
    qb.push(" WHERE \"id\" = ").push_bind(id);
    qb
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn find_one<E: Record>(&mut self, filter: Filter) -> DbResult<Option<E>> {
        if filter.value.is_null() {
            return Ok(None);
        }

        let mut qb = select_query(E::TABLE, filter);
        let tx = self.transaction().await?;
        qb.build_query_as::<E>()
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| DbError::from_query(E::TABLE, e))
    }

    #[instrument(skip(self, row), fields(table = E::TABLE))]
    async fn insert<E: Record>(&mut self, row: &E) -> DbResult<i64> {
        let mut qb = insert_query(row);
        let tx = self.transaction().await?;
        let id = qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| DbError::from_query(E::TABLE, e))?;

        debug!(table = E::TABLE, id, "Inserted row");
        Ok(id)
    }

    #[instrument(skip(self, row), fields(table = E::TABLE))]
    async fn update<E: Record>(&mut self, row: &E) -> DbResult<()> {
        let id = row.id().ok_or(DbError::NotPersisted { table: E::TABLE })?;

        let mut qb = update_query(id, row);
        let tx = self.transaction().await?;
        qb.build()
            .execute(&mut **tx)
            .await
            .map_err(|e| DbError::from_query(E::TABLE, e))?;

        debug!(table = E::TABLE, id, "Updated row");
        Ok(())
    }

    async fn flush(&mut self) -> DbResult<()> {
        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await.map_err(DbError::ConnectionFailed)?;
            trace!("Transaction committed");
        }
        Ok(())
    }

    async fn rollback(&mut self) -> DbResult<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await.map_err(DbError::ConnectionFailed)?;
            debug!("Transaction rolled back");
        }
        Ok(())
    }
}
