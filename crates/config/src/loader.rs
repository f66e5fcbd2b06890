//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for overrides in tests and
//!   binaries.
//! - Enforce the `DOTENV_DISABLED` gate so tests never pick up a developer's
//!   local `.env` by accident.
//!
//! Invariants / assumptions:
//! - Environment variables take precedence over builder defaults.
//! - A missing username is not an error: it disables authentication so the
//!   proxy can talk to an unauthenticated stand-in backend.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_LISTEN_ADDR, DEFAULT_TIMEOUT_SECS};
use crate::types::{AuthStrategy, Config, ConnectionConfig, Credentials};

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Configuration loader that builds config from environment variables.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    strategy: Option<AuthStrategy>,
    timeout: Option<Duration>,
    listen_addr: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or
    /// "1", the `.env` file will not be loaded (useful for testing).
    pub fn load_dotenv(self) -> Self {
        if std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("true")
            && std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("1")
        {
            dotenvy::dotenv().ok();
        }
        self
    }

    /// Read an environment variable, returning None if unset, empty, or
    /// whitespace-only.
    pub fn env_var_or_none(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    /// Read configuration from `VMS_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if let Some(url) = Self::env_var_or_none("VMS_API_URL") {
            self.base_url = Some(url);
        }
        if let Some(username) = Self::env_var_or_none("VMS_USERNAME") {
            self.username = Some(username);
        }
        // Empty password is valid, so the emptiness filter does not apply.
        if let Ok(password) = std::env::var("VMS_PASSWORD") {
            self.password = Some(SecretString::new(password.into()));
        }
        if let Some(method) = Self::env_var_or_none("VMS_AUTH_METHOD") {
            self.strategy =
                Some(
                    AuthStrategy::parse(&method).ok_or_else(|| ConfigError::InvalidValue {
                        var: "VMS_AUTH_METHOD".to_string(),
                        message: "must be 'basic' or 'challenge-response'".to_string(),
                    })?,
                );
        }
        if let Some(timeout) = Self::env_var_or_none("VMS_TIMEOUT") {
            let secs: u64 = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "VMS_TIMEOUT".to_string(),
                    message: "must be a number of seconds".to_string(),
                })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(addr) = Self::env_var_or_none("VMS_LISTEN_ADDR") {
            self.listen_addr = Some(addr);
        }
        Ok(self)
    }

    /// Set the upstream base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the authentication strategy.
    pub fn with_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the upstream request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the final configuration.
    ///
    /// Missing credentials are a warning, not an error: the proxy then runs
    /// unauthenticated, which is the expected mode against the stand-in
    /// backend.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;

        let strategy = self.strategy.unwrap_or_default();
        let username = self.username.unwrap_or_default();
        if username.is_empty() {
            warn!("VMS_USERNAME not set; upstream requests will be unauthenticated");
        }

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                timeout: self
                    .timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            },
            credentials: Credentials {
                username,
                password: self
                    .password
                    .unwrap_or_else(|| SecretString::new(String::new().into())),
                strategy,
            },
            listen_addr: self
                .listen_addr
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        })
    }
}
