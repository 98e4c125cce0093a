//! # tsnap-sync
//!
//! Synchronizes the quarterly static reports and TsNAP service-center data
//! published upstream into the relational tables of `tsnap-db`.
//!
//! ## Flow
//!
//! ```text
//! ReportSource ──► ReportSyncOrchestrator ──► EntityReconciler ──► UnitOfWork
//!   reports            per report / entry       upsert cascade        commit
//! ```
//!
//! The orchestrator owns the unit of work for the whole run and lends it to
//! a reconciler per record. Every record is committed on its own; a failure
//! rolls back only that record and is then handled per [`FailurePolicy`].

pub mod error;
pub mod fields;
pub mod orchestrator;
pub mod period;
pub mod reconciler;

pub use error::{SyncError, SyncResult};
pub use orchestrator::{FailurePolicy, ReportSyncOrchestrator, SyncSummary};
pub use period::ReportPeriod;
pub use reconciler::{EntityReconciler, Reconcile};
