//! The list of UX cases shown on the landing page.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// A case counts as new for this many days after it is published.
pub const NEW_CASE_WINDOW_DAYS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseMetadata {
    pub title: &'static str,
    pub slug: &'static str,
    pub created_at: NaiveDate,
    pub tags: &'static [&'static str],
    /// Manually curated.
    pub is_trending: bool,
}

impl CaseMetadata {
    /// Created within [`NEW_CASE_WINDOW_DAYS`] of `today`.
    pub fn is_new(&self, today: NaiveDate) -> bool {
        let cutoff = today
            .checked_sub_days(Days::new(NEW_CASE_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        self.created_at >= cutoff
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Every case, in publication order.
pub fn cases() -> Vec<CaseMetadata> {
    vec![
        CaseMetadata {
            title: "Slack doesn't ship gray boxes. You shouldn't either.",
            slug: "image-loading-blurhash",
            created_at: date(2025, 10, 19),
            tags: &["images", "loading"],
            is_trending: false,
        },
        CaseMetadata {
            title: "How to use splash screen",
            slug: "how-to-use-splash-screen",
            created_at: date(2025, 1, 27),
            tags: &["splash", "loading", "performance"],
            is_trending: false,
        },
        CaseMetadata {
            title: "Route Handlers vs Server Actions for Data Fetching",
            slug: "route-handlers-vs-server-actions",
            created_at: date(2025, 11, 15),
            tags: &["data-fetching", "api", "performance", "react-query"],
            is_trending: false,
        },
    ]
}

/// Newest first.
pub fn sorted_by_date() -> Vec<CaseMetadata> {
    let mut cases = cases();
    cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    cases
}

pub fn new_cases(today: NaiveDate) -> Vec<CaseMetadata> {
    sorted_by_date()
        .into_iter()
        .filter(|case| case.is_new(today))
        .collect()
}

pub fn trending() -> Vec<CaseMetadata> {
    sorted_by_date()
        .into_iter()
        .filter(|case| case.is_trending)
        .collect()
}

pub fn find(slug: &str) -> Option<CaseMetadata> {
    cases().into_iter().find(|case| case.slug == slug)
}
