//! Boundary error mapping.
//!
//! Every client error becomes a generic 502 toward the dashboard. Upstream
//! details (URLs, status codes, session state) stay in the logs and never
//! reach the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};
use vms_client::ClientError;

/// A failed upstream call, surfaced at the HTTP boundary.
#[derive(Debug)]
pub struct UpstreamGateway(pub ClientError);

impl From<ClientError> for UpstreamGateway {
    fn from(err: ClientError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UpstreamGateway {
    fn into_response(self) -> Response {
        // Malformed bodies usually mean a misconfigured base URL; log them
        // louder than plain connectivity failures.
        match &self.0 {
            ClientError::MalformedResponse(_) => {
                error!(error = %self.0, "upstream returned an unusable body");
            }
            err => {
                warn!(error = %err, "upstream call failed");
            }
        }
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({"message": "Upstream API unavailable"})),
        )
            .into_response()
    }
}
