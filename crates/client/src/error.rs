//! Error types for the VMS client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during VMS client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Session establishment against the upstream failed. Fatal for the
    /// request that needed the session, but does not poison later attempts.
    #[error("Session creation failed: {0}")]
    SessionCreation(String),

    /// The one permitted retry after an authentication failure also failed.
    #[error("Authentication failed after retry")]
    AuthExhausted,

    /// The upstream rejected the request with an embedded protocol error
    /// code despite an HTTP success status.
    #[error("Upstream rejected authentication (code {code})")]
    AuthRejected { code: i64 },

    /// HTTP transport failure (network error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the upstream.
    #[error("Upstream returned status {status} for {url}")]
    ApiError { status: u16, url: String },

    /// Body was neither valid JSON nor the expected XML envelope.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Whether this error signals an authentication failure that the proxy
    /// may answer with its single clear-and-retry cycle.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthRejected { .. } | Self::ApiError { status: 401, .. }
                | Self::ApiError { status: 403, .. }
        )
    }

    /// Whether the error should be reported as generic upstream
    /// unavailability at the request boundary. Malformed bodies are logged
    /// distinctly but mapped the same way.
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::ApiError { .. } | Self::MalformedResponse(_)
        )
    }
}
