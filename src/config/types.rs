use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetch::Resource;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Which readiness signal the splash gate treats as primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimarySignal {
    /// Splash yields once the data fetch settles.
    Data,
    /// Splash yields once the intro video fires its configured trigger.
    #[default]
    Video,
}

/// Events emitted by the splash video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoEvent {
    /// Enough data buffered to start playback.
    CanPlay,
    /// Playback reached the end.
    #[default]
    Ended,
}

/// Splash gate bounds and signal policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashConfig {
    /// Floor: never dismiss before this elapses (default: 1000).
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
    /// Cap: always dismiss once this elapses (default: 5000).
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
    /// Periodic re-check interval (default: 100).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub primary_signal: PrimarySignal,
    /// The one video event that counts as "video ready".
    #[serde(default)]
    pub video_trigger: VideoEvent,
    /// Per-image preload timeout (default: 3000).
    #[serde(default = "default_image_timeout_ms")]
    pub image_timeout_ms: u64,
}

/// Mock data source behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_article_delay_min_ms")]
    pub article_delay_min_ms: u64,
    #[serde(default = "default_article_delay_max_ms")]
    pub article_delay_max_ms: u64,
    /// Fixed delay for each dashboard resource (default: 1000).
    #[serde(default = "default_metric_delay_ms")]
    pub metric_delay_ms: u64,
    /// RNG seed for latency and shuffling. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Deterministic article selection seed (e.g. "test123").
    #[serde(default)]
    pub article_seed: Option<String>,
    /// Resources whose simulated call rejects.
    #[serde(default)]
    pub failures: HashSet<Resource>,
}

/// Mock HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// `s-maxage` advertised on dashboard responses (default: 60).
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
}

fn default_min_duration_ms() -> u64 {
    1000
}

fn default_max_duration_ms() -> u64 {
    5000
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_image_timeout_ms() -> u64 {
    3000
}

fn default_article_delay_min_ms() -> u64 {
    800
}

fn default_article_delay_max_ms() -> u64 {
    1200
}

fn default_metric_delay_ms() -> u64 {
    1000
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_cache_max_age_secs() -> u64 {
    60
}

impl SplashConfig {
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }

    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }
}

impl FetchConfig {
    pub fn metric_delay(&self) -> Duration {
        Duration::from_millis(self.metric_delay_ms)
    }

    pub fn fails(&self, resource: Resource) -> bool {
        self.failures.contains(&resource)
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            primary_signal: PrimarySignal::default(),
            video_trigger: VideoEvent::default(),
            image_timeout_ms: default_image_timeout_ms(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            article_delay_min_ms: default_article_delay_min_ms(),
            article_delay_max_ms: default_article_delay_max_ms(),
            metric_delay_ms: default_metric_delay_ms(),
            seed: None,
            article_seed: None,
            failures: HashSet::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cache_max_age_secs: default_cache_max_age_secs(),
        }
    }
}
