use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Why a single image failed. Never fatal to the preload as a whole.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Request for '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("'{url}' is not an image (content-type: {content_type})")]
    NotAnImage { url: String, content_type: String },

    #[error("'{url}' did not load within {after_ms}ms")]
    Timeout { url: String, after_ms: u64 },
}

#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<(), ImageLoadError>;
}

/// Fetches the full image body over HTTP.
#[derive(Clone, Default)]
pub struct HttpImageLoader {
    client: reqwest::Client,
}

impl HttpImageLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<(), ImageLoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ImageLoadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !content_type.starts_with("image/") {
                return Err(ImageLoadError::NotAnImage {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response
            .bytes()
            .await
            .map_err(|source| ImageLoadError::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Loaded,
    /// Rendered as a broken-image placeholder.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResult {
    pub url: String,
    pub outcome: ImageOutcome,
}

/// Per-URL outcomes, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub images: Vec<ImageResult>,
}

impl PreloadReport {
    pub fn loaded(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.outcome == ImageOutcome::Loaded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.images.len() - self.loaded()
    }

    pub fn outcome(&self, url: &str) -> Option<&ImageOutcome> {
        self.images
            .iter()
            .find(|image| image.url == url)
            .map(|image| &image.outcome)
    }
}

/// Load every URL concurrently and resolve once each has loaded or failed.
///
/// Never returns an error: a broken asset becomes `ImageOutcome::Failed`,
/// and `per_image_timeout` bounds a stalled one.
pub async fn preload(
    loader: Arc<dyn ImageLoader>,
    urls: Vec<String>,
    per_image_timeout: Duration,
) -> PreloadReport {
    let handles: Vec<_> = urls
        .into_iter()
        .map(|url| {
            let loader = loader.clone();
            let task_url = url.clone();
            let handle = tokio::spawn(async move {
                let result = tokio::time::timeout(per_image_timeout, loader.load(&task_url)).await;
                match result {
                    Ok(result) => result,
                    Err(_) => Err(ImageLoadError::Timeout {
                        url: task_url,
                        after_ms: per_image_timeout.as_millis() as u64,
                    }),
                }
            });
            (url, handle)
        })
        .collect();

    let mut images = Vec::with_capacity(handles.len());
    for (url, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(())) => ImageOutcome::Loaded,
            Ok(Err(err)) => {
                tracing::debug!(%url, error = %err, "image failed to preload");
                ImageOutcome::Failed(err.to_string())
            }
            Err(join_err) => ImageOutcome::Failed(format!("image loader task failed: {join_err}")),
        };
        images.push(ImageResult { url, outcome });
    }

    let report = PreloadReport { images };
    tracing::debug!(
        loaded = report.loaded(),
        failed = report.failed(),
        "image preload settled"
    );
    report
}
