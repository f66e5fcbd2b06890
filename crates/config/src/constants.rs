//! Centralized constants for the VMS dashboard workspace.
//!
//! This module contains protocol-mandated values and default settings used
//! across crates to avoid magic number duplication.

// =============================================================================
// Upstream session protocol
// =============================================================================

/// Inactivity window after which the upstream invalidates an auth session.
/// Fixed by the vendor protocol; expiry is inferred client-side because the
/// server never sends an explicit expiry signal.
pub const SESSION_TIMEOUT_SECS: u64 = 60;

/// Interval between keep-alive refresh calls. Leaves a 10 second margin
/// under [`SESSION_TIMEOUT_SECS`]; tunable on the session store for
/// deployments that want a larger safety margin.
pub const KEEP_ALIVE_INTERVAL_SECS: u64 = 50;

/// Pause after clearing a session, letting in-flight upstream operations
/// settle before a replacement session is created.
pub const CLEAR_SETTLE_MS: u64 = 100;

/// Error code the upstream embeds in an otherwise HTTP-200 body when the
/// presented session or digest is not accepted.
pub const AUTH_ERROR_CODE: i64 = 101;

// =============================================================================
// Connection defaults
// =============================================================================

/// Default HTTP request timeout in seconds for upstream calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default upstream base URL (the stand-in backend used in development).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8089";

/// Default bind address for the dashboard API server.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";
