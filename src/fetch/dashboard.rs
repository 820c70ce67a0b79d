//! Dashboard metrics fetched either one after another or all at once.
//!
//! The Don't variant calls the in-process "server action" functions, which
//! execute one at a time; the Do variant issues independent HTTP GETs to
//! the route handlers. All three requests are issued at the same moment in
//! both variants, so the timing records show the queueing directly:
//! sequential durations accumulate (1s, 2s, 3s) while parallel ones overlap.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::clock::Clock;
use crate::config::FetchConfig;
use crate::view::ViewMode;

use super::error::FetchError;
use super::timing::{TimingRecord, TimingSpan};
use super::types::{FetchResult, Resource, RevenueData, StatsData, UsersData};

/// Path prefix of the mock route handlers.
pub const API_PREFIX: &str = "/ux-cases/route-handlers-vs-server-actions/api/";

#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Short label for logs and output.
    fn name(&self) -> &'static str;

    async fn stats(&self) -> Result<StatsData, FetchError>;

    async fn revenue(&self) -> Result<RevenueData, FetchError>;

    async fn users(&self) -> Result<UsersData, FetchError>;
}

/// Direct in-process calls, each with a fixed simulated delay.
pub struct InProcessDashboard {
    delay: Duration,
    failures: HashSet<Resource>,
}

impl InProcessDashboard {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failures: HashSet::new(),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            delay: config.metric_delay(),
            failures: config.failures.clone(),
        }
    }

    pub fn with_failure(mut self, resource: Resource) -> Self {
        self.failures.insert(resource);
        self
    }

    async fn call<T>(&self, resource: Resource, payload: T) -> Result<T, FetchError> {
        tokio::time::sleep(self.delay).await;
        if self.failures.contains(&resource) {
            return Err(FetchError::Simulated { resource });
        }
        Ok(payload)
    }
}

#[async_trait]
impl DashboardSource for InProcessDashboard {
    fn name(&self) -> &'static str {
        "server-action"
    }

    async fn stats(&self) -> Result<StatsData, FetchError> {
        self.call(Resource::Stats, StatsData::sample()).await
    }

    async fn revenue(&self) -> Result<RevenueData, FetchError> {
        self.call(Resource::Revenue, RevenueData::sample()).await
    }

    async fn users(&self) -> Result<UsersData, FetchError> {
        self.call(Resource::Users, UsersData::sample()).await
    }
}

/// GETs against the mock route handlers.
pub struct HttpDashboard {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDashboard {
    /// `base_url` may carry a path prefix (`http://host/app`); endpoints
    /// resolve beneath it.
    pub fn new(client: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn endpoint(&self, resource: Resource) -> Result<Url, FetchError> {
        let relative = API_PREFIX.trim_start_matches('/');
        self.base_url
            .join(&format!("{relative}{resource}"))
            .map_err(|source| FetchError::Url { resource, source })
    }

    async fn get<T: DeserializeOwned>(&self, resource: Resource) -> Result<T, FetchError> {
        let url = self.endpoint(resource)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Request { resource, source })
    }
}

#[async_trait]
impl DashboardSource for HttpDashboard {
    fn name(&self) -> &'static str {
        "route-handler"
    }

    async fn stats(&self) -> Result<StatsData, FetchError> {
        self.get(Resource::Stats).await
    }

    async fn revenue(&self) -> Result<RevenueData, FetchError> {
        self.get(Resource::Revenue).await
    }

    async fn users(&self) -> Result<UsersData, FetchError> {
        self.get(Resource::Users).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Each request waits for the previous one: total = sum of latencies.
    Sequential,
    /// Requests overlap: total = max of latencies.
    Parallel,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::Sequential => f.write_str("sequential"),
            FetchStrategy::Parallel => f.write_str("parallel"),
        }
    }
}

/// Source and strategy for one variant of the dashboard case.
pub fn source_for_view(
    view: ViewMode,
    config: &FetchConfig,
    client: reqwest::Client,
    base_url: Url,
) -> (Box<dyn DashboardSource>, FetchStrategy) {
    match view {
        ViewMode::Do => (
            Box::new(HttpDashboard::new(client, base_url)),
            FetchStrategy::Parallel,
        ),
        ViewMode::Dont => (
            Box::new(InProcessDashboard::from_config(config)),
            FetchStrategy::Sequential,
        ),
    }
}

#[derive(Debug, Clone)]
pub struct MetricSlot<T> {
    pub result: FetchResult<T>,
    pub timing: TimingRecord,
}

#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub source: &'static str,
    pub strategy: FetchStrategy,
    pub stats: MetricSlot<StatsData>,
    pub revenue: MetricSlot<RevenueData>,
    pub users: MetricSlot<UsersData>,
    /// Time until all three settled.
    pub total: Duration,
}

impl DashboardReport {
    pub fn timings(&self) -> [&TimingRecord; 3] {
        [&self.stats.timing, &self.revenue.timing, &self.users.timing]
    }
}

async fn settle<T, F>(
    resource: Resource,
    request: F,
    span: TimingSpan,
    clock: &dyn Clock,
) -> MetricSlot<T>
where
    F: Future<Output = Result<T, FetchError>>,
{
    let result = request.await;
    let timing = span.finish(clock);
    match &result {
        Ok(_) => tracing::debug!(%resource, duration_ms = ?timing.duration_ms, "metric settled"),
        Err(err) => tracing::warn!(%resource, error = %err, "metric fetch failed"),
    }
    MetricSlot {
        result: FetchResult::from_result(result),
        timing,
    }
}

/// Load all three metrics with `strategy`.
///
/// Never fails: each error is folded into its slot's `FetchResult`.
pub async fn load_dashboard(
    source: &dyn DashboardSource,
    strategy: FetchStrategy,
    clock: &dyn Clock,
) -> DashboardReport {
    let started = clock.now();
    let stats_span = TimingSpan::begin(clock);
    let revenue_span = TimingSpan::begin(clock);
    let users_span = TimingSpan::begin(clock);

    let (stats, revenue, users) = match strategy {
        FetchStrategy::Sequential => {
            let stats = settle(Resource::Stats, source.stats(), stats_span, clock).await;
            let revenue = settle(Resource::Revenue, source.revenue(), revenue_span, clock).await;
            let users = settle(Resource::Users, source.users(), users_span, clock).await;
            (stats, revenue, users)
        }
        FetchStrategy::Parallel => {
            tokio::join!(
                settle(Resource::Stats, source.stats(), stats_span, clock),
                settle(Resource::Revenue, source.revenue(), revenue_span, clock),
                settle(Resource::Users, source.users(), users_span, clock),
            )
        }
    };

    let total = clock.now().saturating_duration_since(started);
    tracing::info!(
        source = source.name(),
        %strategy,
        total_ms = total.as_millis() as u64,
        "dashboard loaded"
    );

    DashboardReport {
        source: source.name(),
        strategy,
        stats,
        revenue,
        users,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        let base = Url::parse("http://127.0.0.1:3000").unwrap();
        let dashboard = HttpDashboard::new(reqwest::Client::new(), base);
        assert_eq!(
            dashboard.endpoint(Resource::Revenue).unwrap().as_str(),
            "http://127.0.0.1:3000/ux-cases/route-handlers-vs-server-actions/api/revenue"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        for base in ["http://127.0.0.1:3000/app", "http://127.0.0.1:3000/app/"] {
            let dashboard = HttpDashboard::new(reqwest::Client::new(), Url::parse(base).unwrap());
            assert_eq!(
                dashboard.endpoint(Resource::Stats).unwrap().as_str(),
                "http://127.0.0.1:3000/app/ux-cases/route-handlers-vs-server-actions/api/stats",
                "base = {base}"
            );
        }
    }

    #[test]
    fn view_picks_strategy() {
        let base = Url::parse("http://127.0.0.1:3000").unwrap();
        let config = FetchConfig::default();
        let (source, strategy) =
            source_for_view(ViewMode::Do, &config, reqwest::Client::new(), base.clone());
        assert_eq!(source.name(), "route-handler");
        assert_eq!(strategy, FetchStrategy::Parallel);

        let (source, strategy) =
            source_for_view(ViewMode::Dont, &config, reqwest::Client::new(), base);
        assert_eq!(source.name(), "server-action");
        assert_eq!(strategy, FetchStrategy::Sequential);
    }
}
