use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::clock::SharedClock;
use crate::config::VideoEvent;
use crate::ui::mvi::Reducer;
use crate::ui::splash::{
    GatePolicy, SessionToken, SplashIntent, SplashPhase, SplashReducer, SplashState,
};

use super::timers::GateTimers;

/// Readiness signals delivered by adapters and the video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    Video(VideoEvent),
    DataSettled,
    ImagesSettled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// Dispatched; carries the phase after reducing.
    Applied(SplashPhase),
    /// From an older session, ignored.
    Stale,
}

/// Published on every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateSnapshot {
    pub session: SessionToken,
    pub phase: SplashPhase,
}

/// Splash gate controller.
///
/// Owns one [`SplashState`] plus the timers of its current session. All
/// transitions go through [`SplashReducer`]; this type only adds the clock,
/// the timers and the session check. Cheap to clone.
#[derive(Clone)]
pub struct SplashGate {
    shared: Arc<GateShared>,
}

pub(crate) struct GateShared {
    inner: Mutex<GateInner>,
    clock: SharedClock,
    tick_interval: Duration,
    snapshots: watch::Sender<GateSnapshot>,
}

struct GateInner {
    state: SplashState,
    timers: Option<GateTimers>,
}

impl SplashGate {
    pub fn new(clock: SharedClock, tick_interval: Duration) -> Self {
        let (snapshots, _) = watch::channel(GateSnapshot::default());
        Self {
            shared: Arc::new(GateShared {
                inner: Mutex::new(GateInner {
                    state: SplashState::default(),
                    timers: None,
                }),
                clock,
                tick_interval,
                snapshots,
            }),
        }
    }

    /// Start a new session and return its token.
    ///
    /// The previous session's timers are torn down before the new ones are
    /// spawned. Must be called from within a tokio runtime.
    pub fn reset(&self, policy: GatePolicy) -> SessionToken {
        let now = self.shared.clock.now();
        let mut inner = self.shared.inner.lock();
        inner.timers = None;

        self.shared
            .apply(&mut inner, SplashIntent::Reset { now, policy });
        let session = inner.state.session;

        inner.timers = Some(GateTimers::spawn(
            Arc::downgrade(&self.shared),
            session,
            now,
            self.shared.tick_interval,
            policy.min_duration,
            policy.max_duration,
        ));

        tracing::info!(
            %session,
            min_ms = policy.min_duration.as_millis() as u64,
            max_ms = policy.max_duration.as_millis() as u64,
            require_images = policy.require_images,
            "splash session started"
        );
        session
    }

    /// Deliver a readiness signal for `session`.
    pub fn signal(&self, session: SessionToken, signal: GateSignal) -> SignalOutcome {
        let now = self.shared.clock.now();
        let mut inner = self.shared.inner.lock();

        if inner.state.session != session {
            tracing::debug!(
                stale = %session,
                current = %inner.state.session,
                ?signal,
                "ignoring signal from stale splash session"
            );
            return SignalOutcome::Stale;
        }

        let intent = match signal {
            GateSignal::Video(event) => SplashIntent::Video { event, now },
            GateSignal::DataSettled => SplashIntent::DataSettled { now },
            GateSignal::ImagesSettled => SplashIntent::ImagesSettled { now },
        };
        self.shared.apply(&mut inner, intent);
        SignalOutcome::Applied(inner.state.phase)
    }

    pub fn state(&self) -> SplashState {
        self.shared.inner.lock().state.clone()
    }

    pub fn session(&self) -> SessionToken {
        self.shared.inner.lock().state.session
    }

    pub fn is_visible(&self) -> bool {
        self.shared.inner.lock().state.is_visible()
    }

    /// Whether the current session still has live timers.
    pub fn has_timers(&self) -> bool {
        self.shared.inner.lock().timers.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<GateSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Wait until `session` is dismissed.
    ///
    /// Returns `None` once a newer session has replaced it.
    pub async fn dismissed(&self, session: SessionToken) -> Option<SplashPhase> {
        let mut snapshots = self.subscribe();
        loop {
            let snapshot = *snapshots.borrow_and_update();
            if snapshot.session > session {
                return None;
            }
            if snapshot.session == session && snapshot.phase.is_dismissed() {
                return Some(snapshot.phase);
            }
            if snapshots.changed().await.is_err() {
                return None;
            }
        }
    }

    /// Cancel the current session's timers (unmount).
    pub fn shutdown(&self) {
        self.shared.inner.lock().timers = None;
    }
}

impl GateShared {
    /// Timer callback. Returns whether the caller should keep ticking.
    pub(crate) fn on_timer(&self, session: SessionToken) -> bool {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        if inner.state.session != session || !inner.state.is_visible() {
            return false;
        }
        self.apply(&mut inner, SplashIntent::Tick { now });
        inner.state.is_visible()
    }

    fn apply(&self, inner: &mut GateInner, intent: SplashIntent) {
        let previous = inner.state.phase;
        let state = std::mem::take(&mut inner.state);
        inner.state = SplashReducer::reduce(state, intent);

        let phase = inner.state.phase;
        if phase != previous {
            if let SplashPhase::Dismissed { elapsed, reason } = phase {
                tracing::info!(
                    session = %inner.state.session,
                    elapsed_ms = elapsed.as_millis() as u64,
                    ?reason,
                    "splash dismissed"
                );
                // Nothing left to re-check in this session.
                inner.timers = None;
            }
        }

        self.snapshots.send_replace(GateSnapshot {
            session: inner.state.session,
            phase,
        });
    }
}
