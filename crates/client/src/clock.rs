//! Injectable clock for session expiry bookkeeping.
//!
//! Session validity is inferred client-side from the last-activity
//! timestamp; injecting the clock lets the expiry boundary be unit-tested
//! without real timers.

use std::fmt::Debug;
use std::time::Instant;

/// Source of monotonic time for the session store.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
