use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::clock::SharedClock;
use crate::config::{Config, SplashConfig, VideoEvent};
use crate::fetch::{Article, ArticleService, FetchResult};
use crate::preload::{preload, CacheBust, ImageLoader, PreloadReport};
use crate::ui::splash::{GatePolicy, SessionToken};
use crate::view::{ViewMode, ViewToggle};

use super::gate::{GateSignal, SignalOutcome, SplashGate};

/// What the page underneath the splash has loaded for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub session: SessionToken,
    pub view: ViewMode,
    pub articles: FetchResult<Vec<Article>>,
    /// `None` until preloading settles, and always `None` in the Don't view.
    pub images: Option<PreloadReport>,
    pub cache_bust: CacheBust,
}

/// The splash-screen case page.
///
/// Every start (first mount, view switch) opens a new gate session, kicks
/// off the article fetch, and in the Do view preloads the thumbnails before
/// reporting images ready. Results that arrive for an older session are
/// dropped.
pub struct SplashScreenCase {
    config: SplashConfig,
    article_seed: Option<String>,
    toggle: ViewToggle,
    gate: SplashGate,
    articles: Arc<ArticleService>,
    loader: Arc<dyn ImageLoader>,
    clock: SharedClock,
    content: Arc<Mutex<PageContent>>,
}

impl SplashScreenCase {
    pub fn new(
        config: &Config,
        toggle: ViewToggle,
        articles: Arc<ArticleService>,
        loader: Arc<dyn ImageLoader>,
        clock: SharedClock,
    ) -> Self {
        let gate = SplashGate::new(clock.clone(), config.splash.tick_interval());
        let content = PageContent {
            session: SessionToken::default(),
            view: toggle.get_view(),
            articles: FetchResult::Pending,
            images: None,
            cache_bust: CacheBust::after(None, clock.as_ref()),
        };
        Self {
            config: config.splash.clone(),
            article_seed: config.fetch.article_seed.clone(),
            toggle,
            gate,
            articles,
            loader,
            clock,
            content: Arc::new(Mutex::new(content)),
        }
    }

    /// Mount the page: open a gate session and start loading for it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> SessionToken {
        let view = self.toggle.get_view();
        let policy = GatePolicy::for_view(&self.config, view);
        let session = self.gate.reset(policy);

        let cache_bust = {
            let mut content = self.content.lock();
            let cache_bust = CacheBust::after(Some(content.cache_bust), self.clock.as_ref());
            *content = PageContent {
                session,
                view,
                articles: FetchResult::Pending,
                images: None,
                cache_bust,
            };
            cache_bust
        };

        tracing::info!(%session, %view, "splash page mounted");
        self.spawn_load(session, view, cache_bust);
        session
    }

    /// Switch views. A real change remounts with a fresh session; selecting
    /// the active view is a no-op.
    pub fn set_view(&mut self, mode: ViewMode) -> SessionToken {
        if !self.toggle.set_view(mode) {
            return self.gate.session();
        }
        self.start()
    }

    /// Forward a video element event raised while `session` was mounted.
    /// Events from a video that belonged to an earlier session are stale.
    pub fn video_event(&self, session: SessionToken, event: VideoEvent) -> SignalOutcome {
        self.gate.signal(session, GateSignal::Video(event))
    }

    pub fn view(&self) -> ViewMode {
        self.toggle.get_view()
    }

    pub fn location(&self) -> &Url {
        self.toggle.location()
    }

    pub fn gate(&self) -> &SplashGate {
        &self.gate
    }

    pub fn content(&self) -> PageContent {
        self.content.lock().clone()
    }

    /// Cache-busted thumbnail URLs of the fetched articles.
    pub fn thumbnail_urls(&self) -> Vec<String> {
        let content = self.content.lock();
        thumbnails(&content.articles, content.cache_bust)
    }

    /// Whether thumbnails wait for the splash to clear. True in the Don't
    /// view, which is what makes images pop in after the page appears.
    pub fn defers_images(&self) -> bool {
        self.view() == ViewMode::Dont
    }

    /// Whether the page underneath should be rendered yet.
    ///
    /// The Do view renders behind the splash from the start. The Don't view
    /// waits until the splash is gone and the fetch has settled.
    pub fn should_render_page(&self) -> bool {
        match self.view() {
            ViewMode::Do => true,
            ViewMode::Dont => !self.gate.is_visible() && self.content.lock().articles.is_settled(),
        }
    }

    fn spawn_load(&self, session: SessionToken, view: ViewMode, cache_bust: CacheBust) {
        let gate = self.gate.clone();
        let articles = self.articles.clone();
        let loader = self.loader.clone();
        let content = self.content.clone();
        let seed = self.article_seed.clone();
        let image_timeout = self.config.image_timeout();

        tokio::spawn(async move {
            let result = articles.fetch(seed.as_deref()).await;
            if let Err(err) = &result {
                tracing::warn!(%session, error = %err, "article fetch failed");
            }
            let fetched = FetchResult::from_result(result);
            let urls = thumbnails(&fetched, cache_bust);

            {
                let mut page = content.lock();
                if page.session != session {
                    tracing::debug!(%session, "dropping articles for stale session");
                    return;
                }
                page.articles = fetched;
            }
            gate.signal(session, GateSignal::DataSettled);

            if view != ViewMode::Do {
                return;
            }

            // A failed fetch has no thumbnails, so this settles immediately.
            let report = preload(loader, urls, image_timeout).await;
            {
                let mut page = content.lock();
                if page.session != session {
                    tracing::debug!(%session, "dropping preload report for stale session");
                    return;
                }
                page.images = Some(report);
            }
            gate.signal(session, GateSignal::ImagesSettled);
        });
    }
}

impl Drop for SplashScreenCase {
    fn drop(&mut self) {
        self.gate.shutdown();
    }
}

fn thumbnails(articles: &FetchResult<Vec<Article>>, cache_bust: CacheBust) -> Vec<String> {
    articles
        .success()
        .map(|list| {
            list.iter()
                .map(|article| cache_bust.apply(&article.thumbnail_url))
                .collect()
        })
        .unwrap_or_default()
}
