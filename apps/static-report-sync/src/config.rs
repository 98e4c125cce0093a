use std::path::PathBuf;
use std::time::Duration;

use tsnap_sync::{FailurePolicy, ReportPeriod};

use crate::logging::LogFormat;

/// Configuration of one sync job run.
#[derive(Debug, Clone)]
pub struct SyncJobConfig {
    /// Database connection URL.
    pub database_url: String,

    /// Root of the upstream static-report API.
    pub api_url: String,

    /// Pool size. The job runs sequentially, so a small pool is enough.
    /// Default: 2.
    pub db_max_connections: u32,

    /// Per-request HTTP timeout. Unset means no timeout.
    pub http_timeout: Option<Duration>,

    /// What to do when reconciling a record fails. Default: abort.
    pub failure_policy: FailurePolicy,

    /// Period to sync instead of the current quarter. Set from
    /// `REPORT_YEAR` and `REPORT_QUARTER`, which must be given together.
    pub period: Option<ReportPeriod>,

    /// Create the tables on start-up. Default: true.
    pub run_migrations: bool,

    /// Log filter directive. Default: "info".
    pub log_filter: String,

    /// Log output format. Default: JSON.
    pub log_format: LogFormat,

    /// Append logs to this file instead of stdout.
    pub log_file: Option<PathBuf>,
}

impl SyncJobConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let database_url =
            reader("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL".into()))?;

        let api_url =
            reader("DIIA_API_URL").map_err(|_| ConfigError::MissingVar("DIIA_API_URL".into()))?;

        let db_max_connections = reader("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DB_MAX_CONNECTIONS".into(),
                    "expected a positive integer".into(),
                )
            })?;

        let http_timeout = match reader("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("HTTP_TIMEOUT_SECS".into(), e.to_string())
            })?)),
            Err(_) => None,
        };

        let failure_policy = reader("SYNC_FAILURE_POLICY")
            .unwrap_or_else(|_| "abort".to_string())
            .parse::<FailurePolicy>()
            .map_err(|e| ConfigError::InvalidValue("SYNC_FAILURE_POLICY".into(), e))?;

        let period = match (reader("REPORT_YEAR"), reader("REPORT_QUARTER")) {
            (Ok(year), Ok(quarter)) => {
                let year = year
                    .parse::<i32>()
                    .map_err(|e| ConfigError::InvalidValue("REPORT_YEAR".into(), e.to_string()))?;
                let quarter = quarter.parse::<i32>().map_err(|e| {
                    ConfigError::InvalidValue("REPORT_QUARTER".into(), e.to_string())
                })?;
                let period = ReportPeriod::new(year, quarter).map_err(|e| {
                    ConfigError::InvalidValue("REPORT_QUARTER".into(), e.to_string())
                })?;
                Some(period)
            }
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => return Err(ConfigError::MissingVar("REPORT_QUARTER".into())),
            (Err(_), Ok(_)) => return Err(ConfigError::MissingVar("REPORT_YEAR".into())),
        };

        let run_migrations = reader("RUN_MIGRATIONS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let log_filter = reader("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_format = reader("LOG_FORMAT")
            .unwrap_or_else(|_| "json".to_string())
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidValue("LOG_FORMAT".into(), e))?;

        let log_file = reader("LOG_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url,
            api_url,
            db_max_connections,
            http_timeout,
            failure_policy,
            period,
            run_migrations,
            log_filter,
            log_format,
            log_file,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
