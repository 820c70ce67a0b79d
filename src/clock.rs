//! Time sources.
//!
//! Monotonic instants come from `tokio::time` so that tests running with a
//! paused runtime see deterministic elapsed times. Wall-clock timestamps are
//! only used for display and cache-busting tokens.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

pub trait Clock: Send + Sync {
    /// Monotonic "now", used for durations and deadlines.
    fn now(&self) -> Instant;

    /// Wall-clock "now", used for timestamps shown to the user.
    fn wall(&self) -> DateTime<Utc>;
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
