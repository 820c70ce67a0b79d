//! Plain-text rendering of case pages for the CLI.

use crate::fetch::{
    Article, BadgeVariant, DashboardReport, FetchResult, MetricSlot, RevenueData, StatsData,
    UsersData,
};
use crate::placeholder::{ImagePhase, PlaceholderImage, PlaceholderKind};
use crate::preload::{ImageOutcome, PreloadReport};
use crate::splash::PageContent;

/// Shown in place of the article list when the fetch failed.
pub const ERROR_MESSAGE: &str = "Oops there is something wrong, try again later";

const SKELETON_ROWS: usize = 6;
const SKELETON: &str = "░░░░░░░░░░░░░░░░░░░░";

/// How an article thumbnail currently appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumbnail {
    Loaded,
    Broken,
    /// Not requested until the page shows (Don't view).
    Deferred,
    Loading,
}

impl Thumbnail {
    fn marker(self) -> &'static str {
        match self {
            Thumbnail::Loaded => "[img]",
            Thumbnail::Broken => "[broken]",
            Thumbnail::Deferred => "[deferred]",
            Thumbnail::Loading => "[...]",
        }
    }
}

fn thumbnail_state(
    article: &Article,
    content: &PageContent,
    images: Option<&PreloadReport>,
    defers_images: bool,
) -> Thumbnail {
    let url = content.cache_bust.apply(&article.thumbnail_url);
    match images.and_then(|report| report.outcome(&url)) {
        Some(ImageOutcome::Loaded) => Thumbnail::Loaded,
        Some(ImageOutcome::Failed(_)) => Thumbnail::Broken,
        None if defers_images => Thumbnail::Deferred,
        None => Thumbnail::Loading,
    }
}

/// The article list section of the splash-screen case.
pub fn article_list(content: &PageContent, defers_images: bool) -> String {
    match &content.articles {
        FetchResult::Pending => vec![SKELETON; SKELETON_ROWS].join("\n"),
        FetchResult::Failure(_) => ERROR_MESSAGE.to_string(),
        FetchResult::Success(articles) => articles
            .iter()
            .map(|article| {
                let thumb =
                    thumbnail_state(article, content, content.images.as_ref(), defers_images);
                format!(
                    "{:<10} {} by {}",
                    thumb.marker(),
                    article.title,
                    article.author_name
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn placeholder_marker(slot: &PlaceholderImage) -> &'static str {
    match (&slot.phase, slot.placeholder) {
        (ImagePhase::Loaded, _) => "[img]",
        (ImagePhase::Revealing, PlaceholderKind::Blurhash(_)) => "[fading in]",
        (ImagePhase::Revealing, PlaceholderKind::Gray) => "[loading]",
        (ImagePhase::Placeholder | ImagePhase::Failed(_), PlaceholderKind::Blurhash(_)) => {
            "[blurhash]"
        }
        (ImagePhase::Placeholder | ImagePhase::Failed(_), PlaceholderKind::Gray) => "[gray]",
    }
}

/// One line per profile image of the blurhash case.
pub fn profile_images(images: &[PlaceholderImage]) -> String {
    images
        .iter()
        .map(|slot| {
            let mut line = format!("{:<12} {}", placeholder_marker(slot), slot.alt);
            if let ImagePhase::Failed(reason) = &slot.phase {
                line.push_str(&format!(" (failed: {reason})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn metric_line<T>(
    title: &str,
    slot: &MetricSlot<T>,
    describe: impl Fn(&T) -> String,
) -> String {
    let value = match &slot.result {
        FetchResult::Pending => SKELETON.to_string(),
        FetchResult::Success(data) => describe(data),
        FetchResult::Failure(message) => format!("error: {message}"),
    };
    format!(
        "{:<14} {:<40} {}",
        title,
        value,
        slot.timing.badge(BadgeVariant::Inline)
    )
}

/// One line per metric plus the total.
pub fn dashboard(report: &DashboardReport) -> String {
    let lines = [
        metric_line("Total Views", &report.stats, |s: &StatsData| {
            format!(
                "{} ({} conversion rate)",
                group_thousands(s.views),
                s.conversion_rate
            )
        }),
        metric_line("Revenue", &report.revenue, |r: &RevenueData| {
            format!("${} ({} from last month)", group_thousands(r.total), r.growth)
        }),
        metric_line("Active Users", &report.users, |u: &UsersData| {
            format!(
                "{} ({} new today)",
                group_thousands(u.active_users),
                u.new_today
            )
        }),
        format!(
            "{} via {}: total {}ms",
            report.strategy,
            report.source,
            report.total.as_millis()
        ),
    ];
    lines.join("\n")
}
