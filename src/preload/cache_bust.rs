use crate::clock::Clock;

/// Shared cache-busting token for one gate lifecycle.
///
/// The preload and the later render must request the exact same URL, or
/// the render becomes a second, uncached fetch and the demonstration is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CacheBust(i64);

impl CacheBust {
    pub fn new(token: i64) -> Self {
        Self(token)
    }

    /// Token from wall-clock millis, strictly greater than `previous`.
    pub fn after(previous: Option<CacheBust>, clock: &dyn Clock) -> Self {
        let wall = clock.wall().timestamp_millis();
        match previous {
            Some(CacheBust(last)) if wall <= last => Self(last + 1),
            _ => Self(wall),
        }
    }

    pub fn token(self) -> i64 {
        self.0
    }

    pub fn apply(self, url: &str) -> String {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}t={}", self.0)
    }
}
