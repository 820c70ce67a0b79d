use thiserror::Error;

use super::types::Resource;

/// Errors raised by data sources. Converted to `FetchResult::Failure` at
/// the adapter boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The mock source was configured to reject this call.
    #[error("Simulated failure fetching {resource}")]
    Simulated { resource: Resource },

    #[error("Request for {resource} failed: {source}")]
    Request {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {resource}: HTTP {status}")]
    Status { resource: Resource, status: u16 },

    #[error("Invalid URL for {resource}: {source}")]
    Url {
        resource: Resource,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Simulated { resource }
            | FetchError::Request { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Url { resource, .. } => *resource,
        }
    }
}
