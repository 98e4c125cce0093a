//! Upstream seam of the sync job.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::client::StaticReportClient;
use crate::payload::{RegionEntry, ReportPayload, TsnapDetail};

/// Read access to the static-report data of one period.
///
/// Implementations never fail: a transport failure is logged and reported
/// as an empty list, which callers treat as "nothing to synchronize".
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Reports filed for the period.
    async fn oda_reports(&self, year: i32, quarter: i32) -> Vec<ReportPayload>;

    /// Every region entry of a report, across all pages.
    async fn region_entries(&self, report_id: i64) -> Vec<RegionEntry>;

    /// Detail records of one entry; upstream returns zero or one.
    async fn entry_details(&self, entry_id: i64) -> Vec<TsnapDetail>;
}

#[async_trait]
impl ReportSource for StaticReportClient {
    async fn oda_reports(&self, year: i32, quarter: i32) -> Vec<ReportPayload> {
        info!(year, quarter, "Fetching ODA reports");
        match self.fetch_reports(year, quarter).await {
            Ok(reports) => reports,
            Err(e) => {
                error!(year, quarter, error = %e, status = ?e.status(), "Failed to fetch ODA reports");
                Vec::new()
            }
        }
    }

    async fn region_entries(&self, report_id: i64) -> Vec<RegionEntry> {
        info!(report_id, "Fetching region entries");
        let entries = self.entry_pages(report_id).fetch_all().await;
        if entries.is_empty() {
            warn!(report_id, "No region entries");
        }
        entries
    }

    async fn entry_details(&self, entry_id: i64) -> Vec<TsnapDetail> {
        info!(entry_id, "Fetching TsNAP details");
        match self.fetch_details(entry_id).await {
            Ok(details) => details,
            Err(e) => {
                error!(entry_id, error = %e, status = ?e.status(), "Failed to fetch TsNAP details");
                Vec::new()
            }
        }
    }
}
