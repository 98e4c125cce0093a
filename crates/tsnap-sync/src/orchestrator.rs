//! End-to-end static-report sync.
//!
//! Report list, then per report: reconcile the report, walk its region
//! entries, fetch each entry's detail and reconcile the aggregate. Everything
//! runs sequentially in source order.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};

use tsnap_client::ReportSource;
use tsnap_db::UnitOfWork;

use crate::error::{SyncError, SyncResult};
use crate::period::ReportPeriod;
use crate::reconciler::{EntityReconciler, Reconcile};

/// What a run does when reconciling one record fails.
///
/// Either way the open transaction is rolled back, so earlier committed
/// records stay and the failed record leaves nothing behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    AbortRun,
    /// Log the error, count it and continue with the next record. A failed
    /// report also skips its region entries.
    SkipRecord,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "abort_run" => Ok(FailurePolicy::AbortRun),
            "skip" | "skip_record" => Ok(FailurePolicy::SkipRecord),
            other => Err(format!("unknown failure policy '{other}', expected 'abort' or 'skip'")),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::AbortRun => f.write_str("abort"),
            FailurePolicy::SkipRecord => f.write_str("skip"),
        }
    }
}

/// Counters of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Reports returned by the report list.
    pub reports_seen: usize,
    /// Reports reconciled and committed.
    pub reports_synced: usize,
    /// Region entries listed under synced reports.
    pub entries_seen: usize,
    /// Entries whose detail came back empty.
    pub details_missing: usize,
    /// TsNAP aggregates reconciled and committed.
    pub aggregates_synced: usize,
    /// Records rolled back after a failure.
    pub failed: usize,
}

/// Drives one sync run over an injected source and unit of work.
pub struct ReportSyncOrchestrator<S, U> {
    source: S,
    uow: U,
    policy: FailurePolicy,
}

impl<S: ReportSource, U: UnitOfWork> ReportSyncOrchestrator<S, U> {
    /// Create an orchestrator with the default [`FailurePolicy::AbortRun`].
    pub fn new(source: S, uow: U) -> Self {
        Self {
            source,
            uow,
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn unit_of_work(&self) -> &U {
        &self.uow
    }

    pub fn into_parts(self) -> (S, U) {
        (self.source, self.uow)
    }

    /// Synchronize every report of `period`.
    ///
    /// Fetch failures only shrink the data seen. Reconciliation failures are
    /// handled per [`FailurePolicy`].
    #[instrument(skip(self), fields(period = %period, policy = %self.policy))]
    pub async fn run(&mut self, period: ReportPeriod) -> SyncResult<SyncSummary> {
        let mut summary = SyncSummary::default();

        let reports = self.source.oda_reports(period.year, period.quarter).await;
        info!(count = reports.len(), "Fetched ODA reports");

        for report in &reports {
            summary.reports_seen += 1;

            let result = EntityReconciler::new(&mut self.uow).reconcile(report).await;
            if let Err(e) = result {
                self.handle_failure("oda_report", report.id, e, &mut summary)
                    .await?;
                continue;
            }
            summary.reports_synced += 1;

            self.sync_entries(report.id, &mut summary).await?;
        }

        info!(
            reports_synced = summary.reports_synced,
            aggregates_synced = summary.aggregates_synced,
            failed = summary.failed,
            "Sync run finished"
        );
        Ok(summary)
    }

    async fn sync_entries(&mut self, report_id: i64, summary: &mut SyncSummary) -> SyncResult<()> {
        let entries = self.source.region_entries(report_id).await;
        info!(report_id, count = entries.len(), "Fetched region entries");

        for entry in &entries {
            summary.entries_seen += 1;

            let details = self.source.entry_details(entry.id).await;
            if details.len() > 1 {
                warn!(
                    entry_id = entry.id,
                    count = details.len(),
                    "Several details returned, reconciling the first"
                );
            }
            let Some(detail) = details.into_iter().next() else {
                debug!(entry_id = entry.id, "No detail for entry");
                summary.details_missing += 1;
                continue;
            };

            match EntityReconciler::new(&mut self.uow).reconcile(&detail).await {
                Ok(_) => summary.aggregates_synced += 1,
                Err(e) => {
                    self.handle_failure("tsnap", entry.id, e, summary).await?;
                }
            }
        }

        Ok(())
    }

    async fn handle_failure(
        &mut self,
        record: &'static str,
        id: i64,
        err: SyncError,
        summary: &mut SyncSummary,
    ) -> SyncResult<()> {
        summary.failed += 1;

        if let Err(rollback_err) = self.uow.rollback().await {
            error!(record, id, error = %rollback_err, "Rollback failed");
        }

        match self.policy {
            FailurePolicy::AbortRun => {
                error!(record, id, error = %err, "Reconciliation failed, aborting run");
                Err(err)
            }
            FailurePolicy::SkipRecord => {
                warn!(record, id, error = %err, "Reconciliation failed, skipping record");
                Ok(())
            }
        }
    }
}
