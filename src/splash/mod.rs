//! Splash screen runtime: the gate controller that owns timers and the
//! session guard, and the splash-screen case that feeds it signals.

mod gate;
mod page;
mod timers;

pub use gate::{GateSignal, GateSnapshot, SignalOutcome, SplashGate};
pub use page::{PageContent, SplashScreenCase};
