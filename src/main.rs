use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use uxcases::catalog;
use uxcases::clock::SystemClock;
use uxcases::config::Config;
use uxcases::fetch::{load_dashboard, source_for_view, ArticleService};
use uxcases::placeholder::ImageLoadingCase;
use uxcases::preload::HttpImageLoader;
use uxcases::render;
use uxcases::rng::SeededRng;
use uxcases::server::MockServer;
use uxcases::splash::{GateSignal, SplashScreenCase};
use uxcases::ui::splash::SplashPhase;
use uxcases::view::{ViewMode, ViewToggle};

mod cli;

use crate::cli::{Cli, Command};

const SPLASH_CASE_URL: &str = "http://127.0.0.1/ux-cases/how-to-use-splash-screen";
/// Upper bound on waiting for the page after the splash clears.
const PAGE_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    uxcases::logging::init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    match cli.command {
        Command::Serve { bind } => serve(&config, bind).await,
        Command::Cases => {
            print_cases();
            Ok(())
        }
        Command::Splash { view, video_ms } => run_splash(&config, view.into(), video_ms).await,
        Command::Images { view } => run_images(&config, view.into()).await,
        Command::Dashboard { view, base_url } => run_dashboard(&config, view.into(), base_url).await,
    }
}

async fn serve(config: &Config, bind: Option<String>) -> Result<()> {
    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let mut server = MockServer::from_config(config);
    let (_, base_url) = server.try_bind(&bind_addr).await?;
    println!("Serving on {base_url} (ctrl-c to stop)");
    server.run().await?;
    Ok(())
}

fn print_cases() {
    let today = chrono::Local::now().date_naive();
    for case in catalog::sorted_by_date() {
        let mut markers = Vec::new();
        if case.is_new(today) {
            markers.push("new");
        }
        if case.is_trending {
            markers.push("trending");
        }
        let markers = if markers.is_empty() {
            String::new()
        } else {
            format!(" [{}]", markers.join(", "))
        };
        println!(
            "{}  {}{}\n            /ux-cases/{}  #{}",
            case.created_at,
            case.title,
            markers,
            case.slug,
            case.tags.join(" #")
        );
    }
}

async fn run_splash(config: &Config, view: ViewMode, video_ms: u64) -> Result<()> {
    let mut toggle = ViewToggle::parse(SPLASH_CASE_URL)?;
    toggle.set_view(view);

    let clock = SystemClock::shared();
    let articles = Arc::new(ArticleService::from_config(&config.fetch));
    let loader = Arc::new(HttpImageLoader::default());
    let mut case = SplashScreenCase::new(config, toggle, articles, loader, clock);

    println!("{}", case.location());
    let session = case.start();

    let gate = case.gate().clone();
    let trigger = config.splash.video_trigger;
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(video_ms)).await;
        gate.signal(session, GateSignal::Video(trigger));
    });

    match case.gate().dismissed(session).await {
        Some(SplashPhase::Dismissed { elapsed, reason }) => {
            println!("splash dismissed after {}ms ({reason:?})", elapsed.as_millis());
        }
        _ => println!("splash session was replaced"),
    }

    let deadline = tokio::time::Instant::now() + PAGE_SETTLE_TIMEOUT;
    while !case.should_render_page() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let content = case.content();
    println!("{}", render::article_list(&content, case.defers_images()));
    if let Some(report) = &content.images {
        println!(
            "images: {} loaded, {} failed",
            report.loaded(),
            report.failed()
        );
    }
    Ok(())
}

async fn run_images(config: &Config, view: ViewMode) -> Result<()> {
    let rng = config
        .fetch
        .seed
        .map(SeededRng::new)
        .unwrap_or_else(SeededRng::from_entropy);
    let loader = Arc::new(HttpImageLoader::default());
    let mut case = ImageLoadingCase::new(view, loader, rng, config.splash.image_timeout());

    case.start();
    let mut last = String::new();
    let started = tokio::time::Instant::now();
    while !case.is_settled() {
        let rendered = render::profile_images(&case.images());
        if rendered != last {
            println!("-- {}ms\n{}", started.elapsed().as_millis(), rendered);
            last = rendered;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    case.finished().await;
    println!(
        "-- {}ms\n{}",
        started.elapsed().as_millis(),
        render::profile_images(&case.images())
    );
    Ok(())
}

async fn run_dashboard(config: &Config, view: ViewMode, base_url: Option<String>) -> Result<()> {
    let mut local_server = None;
    let base_url = match base_url {
        Some(url) => url,
        None if view == ViewMode::Do => {
            let mut server = MockServer::from_config(config);
            let (_, url) = server.try_bind("127.0.0.1:0").await?;
            local_server = Some(server.handle());
            tokio::spawn(async move {
                if let Err(e) = server.run().await {
                    tracing::error!("mock server failed: {}", e);
                }
            });
            url
        }
        None => format!("http://{}", config.server.bind_addr),
    };
    let base_url = Url::parse(&base_url).with_context(|| format!("invalid base URL {base_url}"))?;

    let clock = SystemClock::shared();
    let (source, strategy) =
        source_for_view(view, &config.fetch, reqwest::Client::new(), base_url);
    let report = load_dashboard(source.as_ref(), strategy, clock.as_ref()).await;
    println!("{}", render::dashboard(&report));

    if let Some(handle) = local_server {
        handle.shutdown();
    }
    Ok(())
}
