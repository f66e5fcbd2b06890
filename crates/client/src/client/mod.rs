//! HTTP client for the upstream VMS API.
//!
//! Responsibilities:
//! - Build requests against `/Interface/...` endpoints with auth material
//!   attached (session query parameters or a Basic header).
//! - Decode and unwrap the vendor envelope.
//! - On an auth failure under session auth, clear the session and retry the
//!   request exactly once; a second auth failure is terminal.
//!
//! Does NOT handle:
//! - Session bookkeeping (delegated to [`SessionStore`]).
//! - HTTP routing for the dashboard (the server crate).

mod analytics;
mod audit;
mod bookmarks;
mod cameras;
mod system;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};
use vms_config::constants::{AUTH_ERROR_CODE, DEFAULT_TIMEOUT_SECS};
use vms_config::{AuthStrategy, Config, Credentials};

use crate::clock::Clock;
use crate::envelope::{decode_body, extract_payload, response_code};
use crate::error::{ClientError, Result};
use crate::params::{AuthMaterial, AuthParamProvider};
use crate::session::SessionStoreBuilder;

/// Per-call request description: method, extra query parameters, optional
/// JSON body, and the envelope key the payload lives under.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    method: Option<Method>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    data_key: Option<&'static str>,
}

impl CallOptions {
    pub fn get() -> Self {
        Self {
            method: Some(Method::GET),
            ..Self::default()
        }
    }

    pub fn post() -> Self {
        Self {
            method: Some(Method::POST),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Some(Method::DELETE),
            ..Self::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add the parameter only when a value is present. Mirrors how the
    /// search endpoints treat absent filters.
    pub fn query_opt(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.query.push((key.into(), value.to_string()));
        }
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn data_key(mut self, key: &'static str) -> Self {
        self.data_key = Some(key);
        self
    }

    fn method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }
}

/// Builder for [`VmsClient`]. The timing knobs exist for tests and forward
/// to the session store.
pub struct VmsClientBuilder {
    base_url: String,
    credentials: Credentials,
    timeout: Duration,
    clock: Option<Arc<dyn Clock>>,
    session_timeout: Option<Duration>,
    keep_alive_interval: Option<Duration>,
    clear_settle: Option<Duration>,
}

impl VmsClientBuilder {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            clock: None,
            session_timeout: None,
            keep_alive_interval: None,
            clear_settle: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.connection.base_url.clone(),
            config.credentials.clone(),
        )
        .timeout(config.connection.timeout)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = Some(timeout);
        self
    }

    pub fn keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = Some(interval);
        self
    }

    pub fn clear_settle(mut self, settle: Duration) -> Self {
        self.clear_settle = Some(settle);
        self
    }

    pub fn build(self) -> Result<VmsClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ClientError::Http)?;

        let store = if self.credentials.strategy == AuthStrategy::ChallengeResponse
            && self.credentials.auth_enabled()
        {
            let mut builder = SessionStoreBuilder::new(
                http.clone(),
                self.base_url.clone(),
                self.credentials.username.clone(),
                self.credentials.password.clone(),
            );
            if let Some(clock) = self.clock {
                builder = builder.clock(clock);
            }
            if let Some(timeout) = self.session_timeout {
                builder = builder.session_timeout(timeout);
            }
            if let Some(interval) = self.keep_alive_interval {
                builder = builder.keep_alive_interval(interval);
            }
            if let Some(settle) = self.clear_settle {
                builder = builder.clear_settle(settle);
            }
            Some(builder.build())
        } else {
            None
        };

        let auth = AuthParamProvider::new(
            self.credentials.strategy,
            self.credentials.username,
            self.credentials.password,
            store,
        );

        Ok(VmsClient {
            http,
            base_url: self.base_url,
            auth,
        })
    }
}

/// Authenticated upstream client. Cloning shares the HTTP pool and the
/// session store.
#[derive(Debug, Clone)]
pub struct VmsClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthParamProvider,
}

impl VmsClient {
    pub fn builder(base_url: impl Into<String>, credentials: Credentials) -> VmsClientBuilder {
        VmsClientBuilder::new(base_url, credentials)
    }

    /// Eagerly establish a session under session auth. Callers treat a
    /// failure as non-fatal: the first real request will retry.
    pub async fn initialize_auth(&self) -> Result<()> {
        if self.auth.is_session_based() {
            self.auth.auth_material().await?;
        }
        Ok(())
    }

    /// Perform one upstream call with the retry-once auth repair.
    ///
    /// An auth failure under session auth clears the session and replays
    /// the request against a fresh one. The retry happens at most once per
    /// call: a second auth failure surfaces as [`ClientError::AuthExhausted`].
    /// Header auth and non-auth errors never retry.
    pub async fn call(&self, endpoint: &str, options: CallOptions) -> Result<Value> {
        match self.execute(endpoint, &options).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_auth_failure() && self.auth.is_session_based() => {
                warn!(endpoint, error = %err, "auth failure, retrying with a fresh session");
                self.auth.clear_session().await;
                match self.execute(endpoint, &options).await {
                    Ok(value) => Ok(value),
                    Err(second) if second.is_auth_failure() => Err(ClientError::AuthExhausted),
                    Err(second) => Err(second),
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn execute(&self, endpoint: &str, options: &CallOptions) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut query = options.query.clone();
        query.push(("ResponseFormat".to_string(), "JSON".to_string()));

        let mut request = self.http.request(options.method(), &url);
        match self.auth.auth_material().await? {
            AuthMaterial::Query { session_id, digest } => {
                query.push(("AuthSession".to_string(), session_id.to_string()));
                query.push(("AuthData".to_string(), digest));
            }
            AuthMaterial::Header(value) => {
                request = request.header(AUTHORIZATION, value);
            }
            AuthMaterial::None => {}
        }
        request = request.query(&query);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        debug!(%url, "upstream request");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        let value = decode_body(content_type.as_deref(), &body)?;
        if response_code(&value) == Some(AUTH_ERROR_CODE) {
            return Err(ClientError::AuthRejected {
                code: AUTH_ERROR_CODE,
            });
        }

        Ok(extract_payload(value, options.data_key))
    }
}
