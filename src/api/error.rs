/// Errors for backend calls
///
/// Every API operation resolves to a `Result<_, ApiError>`. The variants
/// keep transport problems apart from server rejections so callers can
/// decide between retrying and showing the server's own message.

use serde::Deserialize;
use thiserror::Error;

/// Error body the backend attaches to rejected requests
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: String,
}

/// What went wrong with an API call.
///
/// Payloads are plain strings so the error stays `Clone` and can travel
/// inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The server answered success but the body could not be understood
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Wrap a transport-level failure
    pub fn network(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }

    /// Wrap a body that failed to decode
    pub fn unexpected(err: reqwest::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }

    /// Message suitable for showing to the user.
    ///
    /// Prefers the server's detail text when there is one, otherwise the
    /// given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { detail, .. } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True when the server refused our credentials.
    /// A restored token that has gone stale shows up this way.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }
}
