//! # tsnap-db
//!
//! Relational storage for the static-report synchronization job.
//!
//! ## Modules
//!
//! - [`models`] - One struct per table, mapped with `sqlx::FromRow`
//! - [`record`] - Column description shared by all models
//! - [`unit_of_work`] - Transactional storage contract
//! - [`pg`] - Postgres implementation of the contract
//!
//! ## Example
//!
//! ```rust,ignore
//! use tsnap_db::{run_migrations, DbPool, Filter, PgUnitOfWork, UnitOfWork};
//! use tsnap_db::models::Rsa;
//!
//! let pool = DbPool::connect(&database_url, 2).await?;
//! run_migrations(&pool).await?;
//!
//! let mut uow = PgUnitOfWork::new(pool);
//! let rsa: Option<Rsa> = uow.find_one(Filter::eq("edrpou", "00022473")).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod models;
pub mod pg;
pub mod pool;
pub mod record;
pub mod unit_of_work;

pub use error::{DbError, DbResult};
pub use migrations::run_migrations;
pub use pg::PgUnitOfWork;
pub use pool::DbPool;
pub use record::{Filter, Record, Value};
pub use unit_of_work::UnitOfWork;
