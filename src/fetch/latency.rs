use std::time::Duration;

use crate::rng::SeededRng;

/// Simulated network latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    Fixed(Duration),
    /// Uniform in `[min, max]`, in whole milliseconds.
    Range { min: Duration, max: Duration },
}

impl Latency {
    pub fn from_millis_range(min_ms: u64, max_ms: u64) -> Self {
        if min_ms == max_ms {
            Latency::Fixed(Duration::from_millis(min_ms))
        } else {
            Latency::Range {
                min: Duration::from_millis(min_ms),
                max: Duration::from_millis(max_ms),
            }
        }
    }

    pub fn sample(&self, rng: &mut SeededRng) -> Duration {
        match *self {
            Latency::Fixed(delay) => delay,
            Latency::Range { min, max } => {
                let min_ms = min.as_millis() as u64;
                let max_ms = max.as_millis() as u64;
                Duration::from_millis(rng.next_range(min_ms, max_ms.saturating_add(1)))
            }
        }
    }
}
