//! Mock article source for the splash-screen case.

use parking_lot::Mutex;

use crate::config::FetchConfig;
use crate::rng::SeededRng;

use super::error::FetchError;
use super::latency::Latency;
use super::types::{Article, Resource};

/// Articles returned per fetch.
pub const PAGE_SIZE: usize = 6;

const MOCK_ARTICLES: [(&str, &str, &str); 10] = [
    (
        "Understanding React Server Components",
        "Jane Smith",
        "A deep dive into how React Server Components work and why they matter for modern web development.",
    ),
    (
        "Building Accessible UIs with Shadcn",
        "John Doe",
        "Learn how to create fully accessible user interfaces using Shadcn UI components and best practices.",
    ),
    (
        "Optimizing Next.js Performance",
        "Alice Johnson",
        "Practical tips and techniques for improving the performance of your Next.js applications.",
    ),
    (
        "TypeScript Design Patterns",
        "Bob Williams",
        "Explore common design patterns and how to implement them effectively in TypeScript projects.",
    ),
    (
        "Modern CSS Layout Techniques",
        "Carol Martinez",
        "Master Flexbox, Grid, and other modern CSS layout approaches for responsive designs.",
    ),
    (
        "State Management in React",
        "David Lee",
        "Compare different state management solutions and choose the right one for your application.",
    ),
    (
        "Web Performance Metrics",
        "Emma Davis",
        "Understand Core Web Vitals and other key metrics that impact user experience.",
    ),
    (
        "Building Design Systems",
        "Frank Wilson",
        "A comprehensive guide to creating and maintaining effective design systems.",
    ),
    (
        "API Design Best Practices",
        "Grace Taylor",
        "Learn how to design RESTful and GraphQL APIs that are maintainable and developer-friendly.",
    ),
    (
        "Testing React Applications",
        "Henry Anderson",
        "Strategies for unit testing, integration testing, and E2E testing in React applications.",
    ),
];

pub fn mock_articles() -> Vec<Article> {
    MOCK_ARTICLES
        .iter()
        .enumerate()
        .map(|(index, (title, author, excerpt))| {
            let id = index + 1;
            Article {
                id: id.to_string(),
                title: (*title).to_string(),
                author_name: (*author).to_string(),
                thumbnail_url: format!("https://picsum.photos/seed/article{id}/200/200"),
                excerpt: (*excerpt).to_string(),
            }
        })
        .collect()
}

/// Article list with simulated latency.
///
/// Without a seed the selection is a shuffle, so reloads differ; with a
/// seed string the same six articles come back every time.
pub struct ArticleService {
    articles: Vec<Article>,
    latency: Latency,
    rng: Mutex<SeededRng>,
    fail: bool,
}

impl ArticleService {
    pub fn new(latency: Latency, rng: SeededRng) -> Self {
        Self {
            articles: mock_articles(),
            latency,
            rng: Mutex::new(rng),
            fail: false,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        let rng = config
            .seed
            .map(SeededRng::new)
            .unwrap_or_else(SeededRng::from_entropy);
        let latency =
            Latency::from_millis_range(config.article_delay_min_ms, config.article_delay_max_ms);
        Self::new(latency, rng).failing(config.fails(Resource::Articles))
    }

    /// Make every fetch reject after the usual delay.
    pub fn failing(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    pub fn catalog(&self) -> &[Article] {
        &self.articles
    }

    pub async fn fetch(&self, seed: Option<&str>) -> Result<Vec<Article>, FetchError> {
        let (delay, selection) = {
            let mut rng = self.rng.lock();
            let delay = self.latency.sample(&mut rng);
            let selection = match seed {
                Some(seed) => self.seeded_selection(seed),
                None => {
                    let mut shuffled = self.articles.clone();
                    rng.shuffle(&mut shuffled);
                    shuffled.truncate(PAGE_SIZE);
                    shuffled
                }
            };
            (delay, selection)
        };

        tracing::debug!(delay_ms = delay.as_millis() as u64, "fetching articles");
        tokio::time::sleep(delay).await;

        if self.fail {
            return Err(FetchError::Simulated {
                resource: Resource::Articles,
            });
        }
        Ok(selection)
    }

    fn seeded_selection(&self, seed: &str) -> Vec<Article> {
        if self.articles.is_empty() {
            return Vec::new();
        }
        let seed_num: usize = seed.chars().map(|c| c as usize).sum();
        let start = seed_num % self.articles.len();
        (0..PAGE_SIZE)
            .map(|offset| self.articles[(start + offset) % self.articles.len()].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service() -> ArticleService {
        ArticleService::new(Latency::Fixed(Duration::from_millis(1500)), SeededRng::new(11))
    }

    #[test]
    fn mock_catalog_has_ten_articles() {
        let articles = mock_articles();
        assert_eq!(articles.len(), 10);
        assert_eq!(articles[0].id, "1");
        assert_eq!(
            articles[9].thumbnail_url,
            "https://picsum.photos/seed/article10/200/200"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn seeded_fetch_is_deterministic() {
        let service = service();
        let first = service.fetch(Some("test123")).await.unwrap();
        let second = service.fetch(Some("test123")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), PAGE_SIZE);

        // "demo" = 100 + 101 + 109 + 111 = 421, 421 % 10 = 1
        let demo = service.fetch(Some("demo")).await.unwrap();
        assert_eq!(demo[0].id, "2");
        assert_eq!(demo[5].id, "7");
    }

    #[tokio::test(start_paused = true)]
    async fn seeded_selection_wraps_around() {
        let service = service();
        // "a" = 97, 97 % 10 = 7 → 8, 9, 10, 1, 2, 3
        let ids: Vec<_> = service
            .fetch(Some("a"))
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, ["8", "9", "10", "1", "2", "3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unseeded_fetch_returns_distinct_articles() {
        let service = service();
        let mut ids: Vec<_> = service
            .fetch(None)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids.len(), PAGE_SIZE);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), PAGE_SIZE);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_for_latency() {
        let service = service();
        let start = tokio::time::Instant::now();
        service.fetch(None).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1500));
        assert!(elapsed < Duration::from_millis(1510));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_service_rejects() {
        let service = service().failing(true);
        let err = service.fetch(None).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Simulated {
                resource: Resource::Articles
            }
        ));
    }
}
