//! Configuration types for the upstream VMS connection.

use secrecy::SecretString;
use std::time::Duration;

/// Strategy for authenticating against the upstream VMS API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStrategy {
    /// HTTP Basic authentication: credentials travel in an
    /// `Authorization` header on every request. No session state.
    #[default]
    Basic,
    /// Challenge-response ("safe") authentication: the server issues a
    /// per-session nonce, and every request carries a session id plus an
    /// MD5 digest binding the credentials to that nonce.
    ChallengeResponse,
}

impl AuthStrategy {
    /// Parse a strategy selector. The vendor documentation calls the
    /// challenge-response scheme "safe", so both spellings are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "challenge-response" | "safe" => Some(Self::ChallengeResponse),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::ChallengeResponse => "challenge-response",
        }
    }
}

/// Credentials for the upstream VMS API. Immutable after load.
///
/// An empty username means authentication is disabled entirely, which is
/// how the stand-in backend is addressed during development. An empty
/// password with a non-empty username is a valid combination.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub strategy: AuthStrategy,
}

impl Credentials {
    /// Whether any authentication material should be attached to requests.
    pub fn auth_enabled(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Upstream connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Complete process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub credentials: Credentials,
    pub listen_addr: String,
}
