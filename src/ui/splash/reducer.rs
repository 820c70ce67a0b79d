use tokio::time::Instant;

use crate::config::PrimarySignal;
use crate::ui::mvi::Reducer;

use super::intent::SplashIntent;
use super::state::{DismissReason, SplashPhase, SplashState};

/// Reducer for the splash gate.
///
/// Pure: the controller supplies `now` in every intent and performs the
/// timer bookkeeping around the dispatch call.
pub struct SplashReducer;

impl Reducer for SplashReducer {
    type State = SplashState;
    type Intent = SplashIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SplashIntent::Reset { now, policy } => SplashState {
                policy,
                session: state.session.next(),
                started_at: Some(now),
                ..SplashState::default()
            },

            SplashIntent::Video { event, now } => {
                let mut state = state;
                if event == state.policy.video_trigger {
                    state.video_ready = true;
                }
                evaluate(state, now)
            }

            SplashIntent::DataSettled { now } => {
                let mut state = state;
                state.data_ready = true;
                evaluate(state, now)
            }

            SplashIntent::ImagesSettled { now } => {
                let mut state = state;
                state.images_ready = true;
                evaluate(state, now)
            }

            SplashIntent::Tick { now } => evaluate(state, now),
        }
    }
}

/// Whether the readiness half of the dismissal policy holds.
///
/// `images_ready` only counts when the policy requires images.
pub fn readiness_met(state: &SplashState) -> bool {
    let primary = match state.policy.primary {
        PrimarySignal::Data => state.data_ready,
        PrimarySignal::Video => state.video_ready,
    };

    if state.policy.require_images {
        primary && state.data_ready && state.images_ready
    } else {
        primary
    }
}

fn evaluate(mut state: SplashState, now: Instant) -> SplashState {
    if state.phase.is_dismissed() {
        return state;
    }
    let Some(started_at) = state.started_at else {
        return state;
    };

    let elapsed = now.saturating_duration_since(started_at);
    let policy = state.policy;

    // Cap overrides everything, floor overrides readiness.
    if elapsed >= policy.max_duration {
        state.phase = SplashPhase::Dismissed {
            elapsed,
            reason: DismissReason::MaxDuration,
        };
    } else if elapsed >= policy.min_duration && readiness_met(&state) {
        state.phase = SplashPhase::Dismissed {
            elapsed,
            reason: DismissReason::Ready,
        };
    }

    state
}
