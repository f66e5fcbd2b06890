//! Test support: a manually advanced clock and canned upstream bodies.
//!
//! Compiled only with the `test-utils` feature, which this crate's own dev
//! profile enables.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use crate::clock::Clock;

/// A [`Clock`] whose time only moves when a test advances it.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

/// The standard session-creation reply body.
pub fn session_body(session_id: u64, nonce: &str) -> Value {
    json!({
        "Response": {
            "Code": 0,
            "Message": "OK",
            "Data": {
                "Session": { "ID": session_id, "NOnce": nonce }
            }
        }
    })
}

/// An enveloped data reply, `{Response:{Code:0,Data:{<key>: payload}}}`.
pub fn data_body(key: &str, payload: Value) -> Value {
    json!({
        "Response": {
            "Code": 0,
            "Message": "OK",
            "Data": { key: payload }
        }
    })
}

/// The body the upstream sends when a session is unknown or expired.
pub fn auth_error_body() -> Value {
    json!({
        "Response": {
            "Code": 101,
            "Message": "Invalid authentication session"
        }
    })
}
