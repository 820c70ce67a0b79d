//! Do vs Don't UX case studies as a library: splash-screen gating,
//! sequential vs parallel data fetching, image preloading and the
//! shareable view toggle that switches between the two variants.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod placeholder;
pub mod preload;
pub mod render;
pub mod rng;
pub mod server;
pub mod splash;
pub mod ui;
pub mod view;
