use tokio::time::Instant;

use crate::config::VideoEvent;
use crate::ui::mvi::Intent;

use super::state::GatePolicy;

/// Inputs to the splash gate. Each carries the instant it was observed.
#[derive(Debug, Clone, Copy)]
pub enum SplashIntent {
    /// Start a new session: clears readiness and restarts the clock.
    Reset { now: Instant, policy: GatePolicy },

    /// The splash video fired an event.
    Video { event: VideoEvent, now: Instant },

    /// The data fetch settled (success or failure alike).
    DataSettled { now: Instant },

    /// Every tracked image loaded or failed.
    ImagesSettled { now: Instant },

    /// Periodic re-check so the cap fires without new signals.
    Tick { now: Instant },
}

impl Intent for SplashIntent {}
