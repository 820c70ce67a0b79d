//! Image preloading that never rejects and never hangs.

mod cache_bust;
mod loader;

pub use cache_bust::CacheBust;
pub use loader::{
    preload, HttpImageLoader, ImageLoadError, ImageLoader, ImageOutcome, ImageResult,
    PreloadReport,
};
