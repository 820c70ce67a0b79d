//! View-state layer: MVI primitives and the splash gate state machine.

pub mod mvi;
pub mod splash;
