//! Per-request authentication material.
//!
//! The provider turns the configured strategy into whatever a single
//! request needs: nothing when auth is disabled, a static Basic header, or
//! a session id plus challenge digest from the session store.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use vms_config::AuthStrategy;

use crate::digest::auth_digest;
use crate::error::Result;
use crate::session::SessionStore;

/// What a request must attach to authenticate.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMaterial {
    /// `AuthSession` and `AuthData` query parameters.
    Query { session_id: u64, digest: String },
    /// A ready-to-send `AUTHORIZATION` header value.
    Header(String),
    /// Auth disabled, send nothing.
    None,
}

/// Produces [`AuthMaterial`] for each request and owns the session store
/// when the strategy needs one.
#[derive(Debug, Clone)]
pub struct AuthParamProvider {
    strategy: AuthStrategy,
    username: String,
    password: SecretString,
    store: Option<SessionStore>,
}

impl AuthParamProvider {
    pub fn new(
        strategy: AuthStrategy,
        username: impl Into<String>,
        password: SecretString,
        store: Option<SessionStore>,
    ) -> Self {
        Self {
            strategy,
            username: username.into(),
            password,
            store,
        }
    }

    /// Whether auth failures can be repaired by discarding the session.
    pub fn is_session_based(&self) -> bool {
        self.store.is_some()
    }

    /// Resolve the material for one request. May create a session.
    pub async fn auth_material(&self) -> Result<AuthMaterial> {
        if self.username.is_empty() {
            return Ok(AuthMaterial::None);
        }
        match (&self.strategy, &self.store) {
            (AuthStrategy::ChallengeResponse, Some(store)) => {
                let session = store.get_valid_session().await?;
                let digest = auth_digest(
                    &self.username,
                    self.password.expose_secret(),
                    &session.nonce,
                );
                Ok(AuthMaterial::Query {
                    session_id: session.session_id,
                    digest,
                })
            }
            _ => {
                let raw = format!("{}:{}", self.username, self.password.expose_secret());
                Ok(AuthMaterial::Header(format!(
                    "Basic {}",
                    BASE64.encode(raw)
                )))
            }
        }
    }

    /// Discard the cached session so the next request re-authenticates.
    /// No-op for header-based strategies.
    pub async fn clear_session(&self) {
        if let Some(store) = &self.store {
            store.clear().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(strategy: AuthStrategy, username: &str) -> AuthParamProvider {
        AuthParamProvider::new(strategy, username, SecretString::from("pass"), None)
    }

    #[tokio::test]
    async fn basic_header_is_base64_of_user_colon_pass() {
        let material = provider(AuthStrategy::Basic, "admin")
            .auth_material()
            .await
            .unwrap();
        assert_eq!(
            material,
            AuthMaterial::Header("Basic YWRtaW46cGFzcw==".to_string())
        );
    }

    #[tokio::test]
    async fn empty_username_disables_auth() {
        let material = provider(AuthStrategy::ChallengeResponse, "")
            .auth_material()
            .await
            .unwrap();
        assert_eq!(material, AuthMaterial::None);
    }

    #[tokio::test]
    async fn challenge_response_without_store_degrades_to_basic() {
        let material = provider(AuthStrategy::ChallengeResponse, "admin")
            .auth_material()
            .await
            .unwrap();
        assert!(matches!(material, AuthMaterial::Header(_)));
    }

    #[test]
    fn session_based_only_with_store() {
        assert!(!provider(AuthStrategy::ChallengeResponse, "admin").is_session_based());
    }
}
