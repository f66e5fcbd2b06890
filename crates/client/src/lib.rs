//! Upstream VMS API client.
//!
//! This crate provides the authentication-and-proxy layer between the
//! dashboard's API surface and the upstream VMS API. It maintains
//! challenge-response sessions with automatic keep-alive and expiry
//! handling, retries transparently once on session expiry, and normalizes
//! the vendor's inconsistent response envelopes (JSON or XML, wrapped or
//! unwrapped) into a stable caller-facing schema.

pub mod client;
mod clock;
pub mod digest;
pub mod envelope;
pub mod error;
pub mod models;
mod params;
mod serde_helpers;
mod session;
mod xml;

pub use client::{CallOptions, VmsClient, VmsClientBuilder};
pub use clock::{Clock, SystemClock};
pub use error::{ClientError, Result};
pub use models::{
    AnalyticsConfig, AnalyticsCounter, AnalyticsEvent, AuditLog, AuditSearchParams, Bookmark,
    BookmarkSearchParams, Camera, CameraGroup, DashboardStats, EventSearchParams, NewBookmark,
    SystemStatus,
};
pub use params::{AuthMaterial, AuthParamProvider};
pub use session::{AuthSession, SessionStore, SessionStoreBuilder};

#[cfg(feature = "test-utils")]
pub mod testing;
