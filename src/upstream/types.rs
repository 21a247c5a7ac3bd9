//! Gateway result and error types.

use serde_json::Value;
use thiserror::Error;

/// Outcome of a lookup as seen by the router.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult {
    /// The explorer answered 200 with this JSON document.
    Present(Value),
    /// Non-200 status, transport failure, or a body that is not JSON.
    Absent,
}

impl UpstreamResult {
    pub fn into_option(self) -> Option<Value> {
        match self {
            UpstreamResult::Present(v) => Some(v),
            UpstreamResult::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, UpstreamResult::Present(_))
    }
}

/// Why a lookup or gateway construction failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Configured base URL cannot carry the API path.
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Explorer answered with something other than 200.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// Connection, TLS, or timeout failure.
    #[error("upstream unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// 200 response whose body is not JSON.
    #[error("upstream body is not JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Status(_) => "status",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::InvalidBaseUrl(_) | UpstreamError::Client(_) => "config",
        }
    }
}
