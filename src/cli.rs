//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use uxcases::view::ViewMode;

#[derive(Parser)]
#[command(
    name = "uxcases",
    version,
    about = "Do vs Don't UX cases: splash gating, parallel fetching, image preloading, placeholders"
)]
pub struct Cli {
    /// Config file (default: <config dir>/uxcases/config.toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the mock route-handler server until interrupted.
    Serve {
        /// Overrides `server.bind_addr`.
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// List the cases, newest first.
    Cases,

    /// Run one splash-screen session and print what the page shows.
    Splash {
        #[arg(long, value_enum, default_value = "dont")]
        view: ViewArg,

        /// When the intro video reports the configured trigger event.
        #[arg(long = "video-ms", value_name = "MS", default_value_t = 2000)]
        video_ms: u64,
    },

    /// Load the profile images behind the view's placeholder and print
    /// each image as it changes.
    Images {
        #[arg(long, value_enum, default_value = "dont")]
        view: ViewArg,
    },

    /// Load the dashboard with the view's fetch strategy and print timings.
    Dashboard {
        #[arg(long, value_enum, default_value = "dont")]
        view: ViewArg,

        /// Route-handler server to query in the Do view. Starts an
        /// in-process mock server when omitted.
        #[arg(long = "base-url", value_name = "URL")]
        base_url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewArg {
    Do,
    Dont,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Do => ViewMode::Do,
            ViewArg::Dont => ViewMode::Dont,
        }
    }
}
