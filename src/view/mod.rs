//! Do/Don't view selection, kept in the `view` query parameter of a
//! shareable URL.

mod mode;
mod toggle;

pub use mode::ViewMode;
pub use toggle::{ViewToggle, VIEW_PARAM};
