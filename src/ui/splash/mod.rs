//! Splash gate state machine.
//!
//! Decides the single moment splash content yields to page content, given
//! readiness signals that arrive in any order, a minimum display duration
//! (no flash) and a maximum cap (no indefinite hang).
//!
//! - `state.rs` - gate policy, readiness flags, phase (Showing → Dismissed)
//! - `intent.rs` - signals, ticks and reset
//! - `reducer.rs` - transitions and the dismissal policy (pure)
//!
//! Timers and stale-session guarding live in [`crate::splash`].

mod intent;
mod reducer;
mod state;

pub use intent::SplashIntent;
pub use reducer::{readiness_met, SplashReducer};
pub use state::{DismissReason, GatePolicy, SessionToken, SplashPhase, SplashState};
