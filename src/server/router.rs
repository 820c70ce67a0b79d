use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::catalog::{self, CaseMetadata};
use crate::config::Config;
use crate::fetch::dashboard::API_PREFIX;
use crate::fetch::{Resource, RevenueData, StatsData, UsersData};

use super::error::ServerError;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    metric_delay: Duration,
    cache_max_age_secs: u64,
    failures: Arc<HashSet<Resource>>,
}

impl AppState {
    pub fn new(metric_delay: Duration, cache_max_age_secs: u64) -> Self {
        Self {
            metric_delay,
            cache_max_age_secs,
            failures: Arc::new(HashSet::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            metric_delay: config.fetch.metric_delay(),
            cache_max_age_secs: config.server.cache_max_age_secs,
            failures: Arc::new(config.fetch.failures.clone()),
        }
    }

    /// Make the endpoint for `resource` respond 503.
    pub fn with_failure(mut self, resource: Resource) -> Self {
        Arc::make_mut(&mut self.failures).insert(resource);
        self
    }

    async fn respond<T: Serialize>(
        &self,
        resource: Resource,
        payload: T,
    ) -> Result<Response, ServerError> {
        tokio::time::sleep(self.metric_delay).await;

        if self.failures.contains(&resource) {
            tracing::warn!(%resource, "serving injected failure");
            return Err(ServerError::ResourceUnavailable { resource });
        }

        let cache_control = format!("public, s-maxage={}", self.cache_max_age_secs);
        Ok(([(header::CACHE_CONTROL, cache_control)], Json(payload)).into_response())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cases", get(list_cases))
        .route(&endpoint_path(Resource::Stats), get(stats))
        .route(&endpoint_path(Resource::Revenue), get(revenue))
        .route(&endpoint_path(Resource::Users), get(users))
        .fallback(not_found)
        .with_state(state)
}

pub fn endpoint_path(resource: Resource) -> String {
    format!("{API_PREFIX}{resource}")
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "uxcases",
    })
}

async fn list_cases() -> Json<Vec<CaseMetadata>> {
    Json(catalog::sorted_by_date())
}

async fn stats(State(state): State<AppState>) -> Result<Response, ServerError> {
    state.respond(Resource::Stats, StatsData::sample()).await
}

async fn revenue(State(state): State<AppState>) -> Result<Response, ServerError> {
    state.respond(Resource::Revenue, RevenueData::sample()).await
}

async fn users(State(state): State<AppState>) -> Result<Response, ServerError> {
    state.respond(Resource::Users, UsersData::sample()).await
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound {
        path: uri.path().to_string(),
    }
}
