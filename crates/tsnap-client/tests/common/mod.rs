//! Common test utilities for tsnap-client integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Once;
use tsnap_client::StaticReportClient;
use wiremock::MockServer;

static INIT: Once = Once::new();

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> StaticReportClient {
    init_test_logging();
    StaticReportClient::with_http_client(&server.uri(), reqwest::Client::new())
}

/// Test data factory for a quarterly report.
pub fn create_report(id: i64, edrpou: &str, name: &str) -> Value {
    json!({
        "id": id,
        "year": 2024,
        "quarter": 1,
        "rsa": {
            "name": name,
            "edrpou": edrpou,
            "address": "1 Khreshchatyk St"
        }
    })
}

/// Test data factory for a region entry.
pub fn create_entry(id: i64, idf: &str) -> Value {
    json!({
        "id": id,
        "asc_org": {
            "idf": idf,
            "name": format!("Center {idf}"),
            "address": {
                "address_full": "5 Main St",
                "postal_code": "01001",
                "lat": 50.45,
                "lon": 30.52,
                "locality": {"name": "Kyiv", "codifier": "UA80000000000093317"}
            }
        }
    })
}

/// A `{results, next}` envelope.
pub fn create_page(results: Vec<Value>, next: Option<String>) -> Value {
    json!({"results": results, "next": next})
}
