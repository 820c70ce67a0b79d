use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::{PrimarySignal, SplashConfig, VideoEvent};
use crate::ui::mvi::UiState;
use crate::view::ViewMode;

/// Dismissal bounds and which signals participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    pub min_duration: Duration,
    pub max_duration: Duration,
    /// Wait for image preloading as well (Do variant only).
    pub require_images: bool,
    pub primary: PrimarySignal,
    /// The only video event that sets `video_ready`.
    pub video_trigger: VideoEvent,
}

impl GatePolicy {
    /// Policy for one variant of the splash case.
    pub fn for_view(config: &SplashConfig, view: ViewMode) -> Self {
        Self {
            min_duration: config.min_duration(),
            max_duration: config.max_duration(),
            require_images: view == ViewMode::Do,
            primary: config.primary_signal,
            video_trigger: config.video_trigger,
        }
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            min_duration: Duration::from_millis(1000),
            max_duration: Duration::from_millis(5000),
            require_images: false,
            primary: PrimarySignal::Data,
            video_trigger: VideoEvent::Ended,
        }
    }
}

/// Generation counter identifying one gate lifetime (reset to reset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Every required signal arrived and the floor had elapsed.
    Ready,
    /// The cap elapsed first.
    MaxDuration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplashPhase {
    #[default]
    Showing,
    /// Terminal until the next reset.
    Dismissed {
        /// Time from `started_at` to dismissal.
        elapsed: Duration,
        reason: DismissReason,
    },
}

impl SplashPhase {
    pub fn is_dismissed(&self) -> bool {
        matches!(self, Self::Dismissed { .. })
    }
}

/// State of one splash gate.
///
/// `started_at` is `None` until the first reset; nothing is dismissed
/// before then.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplashState {
    pub policy: GatePolicy,
    pub session: SessionToken,
    pub started_at: Option<Instant>,
    pub video_ready: bool,
    pub data_ready: bool,
    pub images_ready: bool,
    pub phase: SplashPhase,
}

impl UiState for SplashState {}

impl SplashState {
    /// True until the dismissal policy fires.
    pub fn is_visible(&self) -> bool {
        !self.phase.is_dismissed()
    }

    /// Elapsed time since the session started, zero if not started.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default()
    }
}
