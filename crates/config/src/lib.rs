//! Configuration management for the VMS dashboard backend.
//!
//! This crate provides types and a loader for the upstream VMS connection
//! configuration, sourced from environment variables and `.env` files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::{AuthStrategy, Config, ConnectionConfig, Credentials};
