//! Request/response timing for the dashboard metrics.

use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use tokio::time::Instant;

use crate::clock::Clock;

/// Timing of one logical fetch. Replaced wholesale on every re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRecord {
    pub requested_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
}

/// An in-flight fetch: the record plus the monotonic start instant.
#[derive(Debug, Clone)]
pub struct TimingSpan {
    record: TimingRecord,
    started: Instant,
}

impl TimingSpan {
    pub fn begin(clock: &dyn Clock) -> Self {
        Self {
            record: TimingRecord {
                requested_at: clock.wall(),
                responded_at: None,
                duration_ms: None,
            },
            started: clock.now(),
        }
    }

    /// Snapshot while still waiting.
    pub fn pending(&self) -> TimingRecord {
        self.record.clone()
    }

    /// Close the span. Duration comes from the monotonic clock and
    /// `responded_at` is derived from it so both fields always agree.
    pub fn finish(self, clock: &dyn Clock) -> TimingRecord {
        let elapsed = clock.now().saturating_duration_since(self.started);
        let delta = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::zero());
        TimingRecord {
            requested_at: self.record.requested_at,
            responded_at: Some(self.record.requested_at + delta),
            duration_ms: Some(elapsed.as_millis() as u64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Inline,
    Detailed,
}

impl TimingRecord {
    pub fn is_pending(&self) -> bool {
        self.responded_at.is_none()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    pub fn aria_label(&self) -> String {
        match self.duration_ms {
            Some(ms) if !self.is_pending() => format!("Request completed in {ms}ms"),
            _ => format!(
                "Request started at {}, waiting for response",
                format_time(self.requested_at)
            ),
        }
    }

    pub fn badge(&self, variant: BadgeVariant) -> String {
        match variant {
            BadgeVariant::Inline => match self.duration_ms {
                Some(ms) if !self.is_pending() => format!("{ms}ms"),
                _ => format!("Requested at {}", format_time(self.requested_at)),
            },
            BadgeVariant::Detailed => {
                let mut lines = vec![format!("Requested: {}", format_time(self.requested_at))];
                if let Some(responded) = self.responded_at {
                    lines.push(format!("Responded: {}", format_time(responded)));
                }
                if let Some(ms) = self.duration_ms {
                    lines.push(format!("Duration: {ms}ms"));
                }
                lines.join("\n")
            }
        }
    }
}

/// `HH:MM:SS.mmm` in local time.
pub fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S%.3f").to_string()
}
