use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::ui::splash::SessionToken;

use super::gate::GateShared;

/// The scheduled callbacks of one gate session: a periodic re-check plus
/// one-shot wakeups at the minimum and maximum durations.
///
/// Dropping the guard aborts all of them, so a reset, a dismissal or dropping the
/// gate can never leave a timer that fires into a newer session.
pub(crate) struct GateTimers {
    session: SessionToken,
    ticker: JoinHandle<()>,
    floor: JoinHandle<()>,
    deadline: JoinHandle<()>,
}

impl GateTimers {
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(
        gate: Weak<GateShared>,
        session: SessionToken,
        started_at: Instant,
        tick: Duration,
        min_duration: Duration,
        max_duration: Duration,
    ) -> Self {
        // interval_at panics on a zero period
        let tick = tick.max(Duration::from_millis(1));

        let ticker_gate = gate.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(started_at + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(shared) = ticker_gate.upgrade() else {
                    break;
                };
                if !shared.on_timer(session) {
                    break;
                }
            }
        });

        // Readiness that lands before the floor dismisses exactly on it,
        // not on the next tick after it.
        let floor = wake_at(gate.clone(), session, started_at + min_duration);
        let deadline = wake_at(gate, session, started_at + max_duration);

        Self {
            session,
            ticker,
            floor,
            deadline,
        }
    }
}

fn wake_at(gate: Weak<GateShared>, session: SessionToken, at: Instant) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep_until(at).await;
        if let Some(shared) = gate.upgrade() {
            shared.on_timer(session);
        }
    })
}

impl Drop for GateTimers {
    fn drop(&mut self) {
        self.ticker.abort();
        self.floor.abort();
        self.deadline.abort();
        tracing::debug!(session = %self.session, "splash timers torn down");
    }
}
