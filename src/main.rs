use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use usher::app::App;
use usher::config::{Config, default_state_dir};
use usher::error::AppResult;

/// Guided-tour demo: a three-screen visit flow with a spotlight
/// walkthrough that follows you across screens.
#[derive(Debug, Parser)]
#[command(name = "usher", version)]
struct Cli {
    /// Screen to start on (avatar, intake, chart).
    #[arg(long, default_value = "avatar")]
    screen: String,

    /// Config file to load instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable automatic tour start for this run.
    #[arg(long)]
    no_tour: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if cli.no_tour {
        config.tour.auto_start = false;
    }

    let mut app = App::new(config)?;
    app.goto_start_page(&cli.screen)?;
    app.run().await
}

/// File logging, opt-in via `USHER_LOG` (an `EnvFilter` directive). Logs
/// never go to the terminal: it belongs to the UI.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = std::env::var("USHER_LOG").ok()?;
    let dir = default_state_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "usher.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
