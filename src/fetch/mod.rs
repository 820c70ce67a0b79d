//! Mock data sources with simulated latency, sequential vs parallel
//! dashboard loading, and per-request timing instrumentation.

pub mod articles;
pub mod dashboard;
pub mod error;
pub mod latency;
pub mod timing;
pub mod types;

pub use articles::ArticleService;
pub use dashboard::{
    load_dashboard, source_for_view, DashboardReport, DashboardSource, FetchStrategy,
    HttpDashboard, InProcessDashboard, MetricSlot,
};
pub use error::FetchError;
pub use latency::Latency;
pub use timing::{BadgeVariant, TimingRecord, TimingSpan};
pub use types::{
    Article, FetchResult, GrowthTrend, Resource, RevenueData, StatsData, UsersData,
};
