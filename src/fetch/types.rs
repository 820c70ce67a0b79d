use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical resources served by the mock data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Articles,
    Stats,
    Revenue,
    Users,
}

impl Resource {
    pub const DASHBOARD: [Resource; 3] = [Resource::Stats, Resource::Revenue, Resource::Users];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Articles => "articles",
            Resource::Stats => "stats",
            Resource::Revenue => "revenue",
            Resource::Users => "users",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub views: u64,
    pub conversions: u64,
    pub conversion_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueData {
    pub total: u64,
    pub growth: String,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersData {
    pub active_users: u64,
    pub new_today: u64,
    pub growth_trend: GrowthTrend,
}

impl StatsData {
    pub fn sample() -> Self {
        Self {
            views: 45234,
            conversions: 892,
            conversion_rate: "1.97%".to_string(),
        }
    }
}

impl RevenueData {
    pub fn sample() -> Self {
        Self {
            total: 128450,
            growth: "+12.5%".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl UsersData {
    pub fn sample() -> Self {
        Self {
            active_users: 1247,
            new_today: 89,
            growth_trend: GrowthTrend::Up,
        }
    }
}

/// Outcome of one fetch as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchResult<T> {
    #[default]
    Pending,
    Success(T),
    /// Settled with an error; the reason is for logs, not for users.
    Failure(String),
}

impl<T> FetchResult<T> {
    /// Convert an adapter result at the boundary. Errors never propagate past here.
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FetchResult::Success(value),
            Err(err) => FetchResult::Failure(err.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchResult::Pending)
    }

    /// Success and failure both count as settled.
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchResult::Success(value) => Some(value),
            _ => None,
        }
    }
}
