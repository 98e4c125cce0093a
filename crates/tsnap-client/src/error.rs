//! Error types for the static-report client.

use thiserror::Error;

/// Result type alias using `ClientError`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the static-report API.
///
/// These never cross the [`ReportSource`](crate::ReportSource) boundary: the
/// source logs them and reports "nothing to synchronize" instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client could not be constructed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Network or protocol failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
