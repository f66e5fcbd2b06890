//! Dashboard backend: axum router and boundary error mapping.
//!
//! The binary in `main.rs` wires this to config loading and a listener;
//! tests drive the router directly.

pub mod error;
pub mod routes;
