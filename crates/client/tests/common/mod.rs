//! Shared helpers for the client integration tests.

#![allow(dead_code)]

use std::time::Duration;

use secrecy::SecretString;
use vms_client::{VmsClient, VmsClientBuilder};
use vms_config::{AuthStrategy, Credentials};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "pass";

pub fn credentials(strategy: AuthStrategy, username: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: SecretString::from(PASSWORD),
        strategy,
    }
}

/// Builder preconfigured for fast tests: short settle delay, short timeout.
pub fn client_builder(base_url: &str, strategy: AuthStrategy) -> VmsClientBuilder {
    VmsClientBuilder::new(base_url, credentials(strategy, USERNAME))
        .timeout(Duration::from_secs(5))
        .clear_settle(Duration::from_millis(10))
}

/// Client using challenge-response session auth.
pub fn session_client(base_url: &str) -> VmsClient {
    client_builder(base_url, AuthStrategy::ChallengeResponse)
        .build()
        .expect("client should build")
}

/// Client using Basic header auth.
pub fn basic_client(base_url: &str) -> VmsClient {
    client_builder(base_url, AuthStrategy::Basic)
        .build()
        .expect("client should build")
}

/// Client with auth disabled (empty username), for stand-in backends.
pub fn anonymous_client(base_url: &str) -> VmsClient {
    VmsClientBuilder::new(base_url, credentials(AuthStrategy::Basic, ""))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}
