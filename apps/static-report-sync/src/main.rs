//! Static report sync job.
//!
//! Syncs the quarterly static reports of one period into the TsNAP tables,
//! then exits. Meant to be run by cron or a scheduler.

mod config;
mod logging;

use std::process::ExitCode;
use std::time::Instant;

use chrono::Local;
use tsnap_client::{ClientError, StaticReportClient};
use tsnap_db::{run_migrations, DbError, DbPool, PgUnitOfWork};
use tsnap_sync::{ReportPeriod, ReportSyncOrchestrator, SyncError, SyncSummary};

use crate::config::SyncJobConfig;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
enum JobError {
    #[error("database: {0}")]
    Database(#[from] DbError),

    #[error("client: {0}")]
    Client(#[from] ClientError),

    #[error("sync: {0}")]
    Sync(#[from] SyncError),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = match SyncJobConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(
        &config.log_filter,
        config.log_format,
        config.log_file.as_deref(),
    ) {
        eprintln!("Logging error: {e}");
        return ExitCode::FAILURE;
    }

    let started = Instant::now();
    tracing::info!(
        started_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        api_url = %config.api_url,
        failure_policy = %config.failure_policy,
        "Static report sync started"
    );

    let result = run(&config).await;

    tracing::info!(
        finished_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        duration_secs = started.elapsed().as_secs_f64(),
        "Static report sync ended"
    );

    match result {
        Ok(summary) => {
            tracing::info!(
                reports_seen = summary.reports_seen,
                reports_synced = summary.reports_synced,
                entries_seen = summary.entries_seen,
                details_missing = summary.details_missing,
                aggregates_synced = summary.aggregates_synced,
                failed = summary.failed,
                "Sync summary"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Static report sync failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &SyncJobConfig) -> Result<SyncSummary, JobError> {
    let pool = DbPool::connect(&config.database_url, config.db_max_connections).await?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    let period = config.period.unwrap_or_else(ReportPeriod::current);
    tracing::info!(%period, "Syncing report period");

    let client = StaticReportClient::new(&config.api_url, config.http_timeout)?;
    let mut orchestrator = ReportSyncOrchestrator::new(client, PgUnitOfWork::new(pool.clone()))
        .with_policy(config.failure_policy);

    let result = orchestrator.run(period).await;

    // Release the open transaction, if any, before closing the pool.
    drop(orchestrator);
    pool.close().await;

    Ok(result?)
}
