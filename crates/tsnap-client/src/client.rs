//! Static-report API HTTP client (reqwest-based).

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::pagination::{PageLoader, PaginatedFetcher};
use crate::payload::{Page, RegionEntry, ReportPayload, TsnapDetail};

/// Path of the static-report API below the configured API root.
pub const STATIC_REPORTS_PATH: &str = "v1/static_reports";

/// Client for the read-only static-report endpoints.
#[derive(Debug, Clone)]
pub struct StaticReportClient {
    /// `{api_url}/v1/static_reports`, without a trailing slash.
    base_url: String,
    http_client: Client,
}

impl StaticReportClient {
    /// Create a client for the API rooted at `api_url`.
    ///
    /// Without a `timeout` requests wait as long as the transport allows.
    pub fn new(api_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        Url::parse(api_url)
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid API URL {api_url}: {e}")))?;

        let mut builder =
            Client::builder().user_agent(concat!("static-report-sync/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self::with_http_client(api_url, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(api_url: &str, http_client: Client) -> Self {
        let base_url = format!("{}/{STATIC_REPORTS_PATH}", api_url.trim_end_matches('/'));
        Self {
            base_url,
            http_client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reports filed for `year`/`quarter` (GET `list/{year}/{quarter}/`).
    #[instrument(skip(self))]
    pub async fn fetch_reports(&self, year: i32, quarter: i32) -> ClientResult<Vec<ReportPayload>> {
        let page: Page<ReportPayload> = self
            .get(&format!("list/{year}/{quarter}/?format=json"))
            .await?;
        Ok(page.results)
    }

    /// One page of the region entries of a report (GET `entries/{id}`).
    #[instrument(skip(self))]
    pub async fn fetch_entries_page(
        &self,
        report_id: i64,
        page: u32,
    ) -> ClientResult<Page<RegionEntry>> {
        self.get(&format!("entries/{report_id}?page={page}")).await
    }

    /// Every region entry of a report, walked page by page.
    #[must_use]
    pub fn entry_pages(&self, report_id: i64) -> PaginatedFetcher<EntryPages<'_>> {
        PaginatedFetcher::new(EntryPages {
            client: self,
            report_id,
        })
    }

    /// Detail records of one region entry (GET `detail/{id}`).
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, entry_id: i64) -> ClientResult<Vec<TsnapDetail>> {
        let page: Page<TsnapDetail> = self.get(&format!("detail/{entry_id}")).await?;
        Ok(page.results)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "GET");
        let response = self.http_client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ClientError::Decode(format!("Failed to parse response: {e}")))
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            Err(ClientError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Page loader over the region entries of one report.
#[derive(Debug)]
pub struct EntryPages<'a> {
    client: &'a StaticReportClient,
    report_id: i64,
}

#[async_trait]
impl PageLoader for EntryPages<'_> {
    type Item = RegionEntry;

    async fn load_page(&self, page: u32) -> ClientResult<Page<RegionEntry>> {
        self.client.fetch_entries_page(self.report_id, page).await
    }
}
