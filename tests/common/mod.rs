//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use uxcases::config::{Config, PrimarySignal, VideoEvent};
use uxcases::preload::{ImageLoadError, ImageLoader};
use uxcases::server::{AppState, MockServer, ServerHandle};
use uxcases::ui::splash::GatePolicy;

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn policy(min_ms: u64, max_ms: u64, require_images: bool, primary: PrimarySignal) -> GatePolicy {
    GatePolicy {
        min_duration: ms(min_ms),
        max_duration: ms(max_ms),
        require_images,
        primary,
        video_trigger: VideoEvent::Ended,
    }
}

/// Config with deterministic article latency and selection.
pub fn deterministic_config() -> Config {
    let mut config = Config::default();
    config.fetch.seed = Some(7);
    config.fetch.article_seed = Some("demo".to_string());
    config.fetch.article_delay_min_ms = 1000;
    config.fetch.article_delay_max_ms = 1000;
    config.splash.primary_signal = PrimarySignal::Data;
    config
}

/// Image loader that fails or stalls any URL containing a configured
/// fragment, and loads everything else after `default_delay`.
#[derive(Default)]
pub struct MockImageLoader {
    default_delay: Duration,
    broken: Vec<String>,
    slow: Vec<(String, Duration)>,
    calls: Mutex<Vec<String>>,
}

impl MockImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn broken(mut self, fragment: &str) -> Self {
        self.broken.push(fragment.to_string());
        self
    }

    pub fn slow(mut self, fragment: &str, delay: Duration) -> Self {
        self.slow.push((fragment.to_string(), delay));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ImageLoader for MockImageLoader {
    async fn load(&self, url: &str) -> Result<(), ImageLoadError> {
        self.calls.lock().push(url.to_string());

        let delay = self
            .slow
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, delay)| *delay)
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        if self.broken.iter().any(|fragment| url.contains(fragment.as_str())) {
            return Err(ImageLoadError::Status {
                url: url.to_string(),
                status: 404,
            });
        }
        Ok(())
    }
}

/// Start a mock server on an OS-assigned port.
pub async fn spawn_server(state: AppState) -> (SocketAddr, String, ServerHandle) {
    let mut server = MockServer::new(state);
    let (addr, base_url) = server
        .try_bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let handle = server.handle();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    (addr, base_url, handle)
}
