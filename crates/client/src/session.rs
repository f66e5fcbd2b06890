//! Upstream authentication session lifecycle.
//!
//! Responsibilities:
//! - Create sessions via `CreateAuthSession` and cache them with a
//!   last-activity timestamp.
//! - Single-flight both creation and clearing: concurrent callers share one
//!   in-flight operation instead of racing the upstream.
//! - Keep the cached session alive with a background `UpdateAuthSession`
//!   refresh while it is still referenced.
//!
//! Invariants:
//! - At most one session creation request is in flight per store.
//! - A session older than the inactivity timeout is never handed out.
//! - Clearing waits out a short settle period before new creations proceed,
//!   giving the upstream time to retire the old session id.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use vms_config::constants::{CLEAR_SETTLE_MS, KEEP_ALIVE_INTERVAL_SECS, SESSION_TIMEOUT_SECS};

use crate::clock::{Clock, SystemClock};
use crate::digest::auth_digest;
use crate::envelope::{decode_body, extract_session, response_code};
use crate::error::{ClientError, Result};

/// A live upstream session: the id sent as `AuthSession` and the nonce the
/// per-request digest is derived from.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: u64,
    pub nonce: String,
    last_activity: Instant,
}

type CreateFuture = Shared<BoxFuture<'static, std::result::Result<AuthSession, Arc<ClientError>>>>;
type ClearFuture = Shared<BoxFuture<'static, ()>>;

#[derive(Default)]
struct StoreState {
    current: Option<AuthSession>,
    creating: Option<CreateFuture>,
    clearing: Option<ClearFuture>,
}

struct StoreInner {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: SecretString,
    clock: Arc<dyn Clock>,
    session_timeout: Duration,
    keep_alive_interval: Duration,
    clear_settle: Duration,
    state: Mutex<StoreState>,
    keep_alive: Mutex<Option<JoinHandle<()>>>,
}

/// Builder for [`SessionStore`]. The timing knobs default to the production
/// constants and exist so tests can shrink them.
pub struct SessionStoreBuilder {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: SecretString,
    clock: Arc<dyn Clock>,
    session_timeout: Duration,
    keep_alive_interval: Duration,
    clear_settle: Duration,
}

impl SessionStoreBuilder {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            username: username.into(),
            password,
            clock: Arc::new(SystemClock),
            session_timeout: Duration::from_secs(SESSION_TIMEOUT_SECS),
            keep_alive_interval: Duration::from_secs(KEEP_ALIVE_INTERVAL_SECS),
            clear_settle: Duration::from_millis(CLEAR_SETTLE_MS),
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    pub fn clear_settle(mut self, settle: Duration) -> Self {
        self.clear_settle = settle;
        self
    }

    pub fn build(self) -> SessionStore {
        SessionStore {
            inner: Arc::new(StoreInner {
                http: self.http,
                base_url: self.base_url,
                username: self.username,
                password: self.password,
                clock: self.clock,
                session_timeout: self.session_timeout,
                keep_alive_interval: self.keep_alive_interval,
                clear_settle: self.clear_settle,
                state: Mutex::new(StoreState::default()),
                keep_alive: Mutex::new(None),
            }),
        }
    }
}

/// Shared session cache. Cloning is cheap and all clones observe the same
/// session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("base_url", &self.inner.base_url)
            .field("username", &self.inner.username)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Return a session that is valid right now, creating one if needed.
    ///
    /// A cached session within the inactivity window is touched and
    /// returned. Concurrent callers during creation all receive the same
    /// session from a single upstream request.
    pub async fn get_valid_session(&self) -> Result<AuthSession> {
        // A clear in progress must finish before a new session is handed
        // out, including its settle period.
        let clearing = self.inner.state.lock().unwrap().clearing.clone();
        if let Some(pending) = clearing {
            pending.await;
        }

        let pending = {
            let mut state = self.inner.state.lock().unwrap();
            let now = self.inner.clock.now();
            if let Some(session) = state.current.as_mut() {
                if now.duration_since(session.last_activity) < self.inner.session_timeout {
                    session.last_activity = now;
                    return Ok(session.clone());
                }
                debug!(session_id = session.session_id, "session expired");
                state.current = None;
            }
            match state.creating.clone() {
                Some(existing) => existing,
                None => {
                    let inner = Arc::clone(&self.inner);
                    let create = async move { StoreInner::create_and_install(inner).await }
                        .boxed()
                        .shared();
                    state.creating = Some(create.clone());
                    create
                }
            }
        };

        pending
            .await
            .map_err(|err| ClientError::SessionCreation(err.to_string()))
    }

    /// Mark the current session as just used.
    pub fn touch(&self) {
        self.inner.touch();
    }

    /// Drop the current session and cancel its keep-alive.
    ///
    /// Single-flight: concurrent clears share one settle period, and
    /// creations queued behind the clear wait for it to finish.
    pub async fn clear(&self) {
        let pending = {
            let mut state = self.inner.state.lock().unwrap();
            match state.clearing.clone() {
                Some(existing) => existing,
                None => {
                    let inner = Arc::clone(&self.inner);
                    let clear = async move {
                        inner.stop_keep_alive();
                        {
                            let mut state = inner.state.lock().unwrap();
                            state.current = None;
                            state.creating = None;
                        }
                        tokio::time::sleep(inner.clear_settle).await;
                        inner.state.lock().unwrap().clearing = None;
                    }
                    .boxed()
                    .shared();
                    state.clearing = Some(clear.clone());
                    clear
                }
            }
        };
        pending.await;
    }
}

impl StoreInner {
    async fn create_and_install(
        inner: Arc<Self>,
    ) -> std::result::Result<AuthSession, Arc<ClientError>> {
        let result = inner.create_auth_session().await;
        let mut state = inner.state.lock().unwrap();
        state.creating = None;
        match result {
            Ok(session) => {
                state.current = Some(session.clone());
                drop(state);
                inner.start_keep_alive();
                Ok(session)
            }
            Err(err) => Err(Arc::new(err)),
        }
    }

    async fn create_auth_session(&self) -> Result<AuthSession> {
        let url = format!("{}/Interface/CreateAuthSession", self.base_url);
        debug!(%url, "creating upstream auth session");
        let response = self
            .http
            .get(&url)
            .query(&[("Format", "JSON")])
            .send()
            .await
            .map_err(|e| ClientError::SessionCreation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::SessionCreation(format!(
                "upstream returned HTTP {status}"
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::SessionCreation(format!("failed to read body: {e}")))?;
        let value = decode_body(content_type.as_deref(), &body)
            .map_err(|e| ClientError::SessionCreation(e.to_string()))?;
        if let Some(code) = response_code(&value)
            && code != 0
        {
            return Err(ClientError::SessionCreation(format!(
                "upstream refused session (code {code})"
            )));
        }

        let (session_id, nonce) = extract_session(&value)?;
        debug!(session_id, "auth session established");
        Ok(AuthSession {
            session_id,
            nonce,
            last_activity: self.clock.now(),
        })
    }

    async fn refresh_session(&self, session: &AuthSession) -> Result<()> {
        let digest = auth_digest(
            &self.username,
            self.password.expose_secret(),
            &session.nonce,
        );
        let url = format!("{}/Interface/UpdateAuthSession", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("AuthSession", session.session_id.to_string()),
                ("AuthData", digest),
            ])
            .send()
            .await?;

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
        if let Some(code) = response_code(&value)
            && code != 0
        {
            return Err(ClientError::AuthRejected { code });
        }
        Ok(())
    }

    fn touch(&self) {
        let now = self.clock.now();
        if let Some(session) = self.state.lock().unwrap().current.as_mut() {
            session.last_activity = now;
        }
    }

    fn start_keep_alive(self: &Arc<Self>) {
        let weak: Weak<Self> = Arc::downgrade(self);
        let interval = self.keep_alive_interval;
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(inner) = weak.upgrade() else { return };
                let session = inner.state.lock().unwrap().current.clone();
                let Some(session) = session else { return };
                match inner.refresh_session(&session).await {
                    Ok(()) => inner.touch(),
                    Err(err) => {
                        warn!(
                            session_id = session.session_id,
                            error = %err,
                            "keep-alive refresh failed, dropping session"
                        );
                        let mut state = inner.state.lock().unwrap();
                        if state.current.as_ref().map(|s| s.session_id)
                            == Some(session.session_id)
                        {
                            state.current = None;
                        }
                        return;
                    }
                }
            }
        });
        if let Some(previous) = self.keep_alive.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    fn stop_keep_alive(&self) {
        if let Some(handle) = self.keep_alive.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        if let Some(handle) = self.keep_alive.lock().unwrap().take() {
            handle.abort();
        }
    }
}
