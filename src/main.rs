use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use feedmark::app::{App, AppEvent};
use feedmark::config::Config;
use feedmark::feed::FeedClient;
use feedmark::store::FeedStore;
use feedmark::ui;

/// Get the config directory path (~/.config/feedmark/)
fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedmark"))
}

#[derive(Parser, Debug)]
#[command(
    name = "feedmark",
    about = "Terminal RSS reader with markdown-backed subscriptions"
)]
struct Args {
    /// Subscription file (overrides the config file setting)
    #[arg(long, value_name = "FILE")]
    feeds: Option<PathBuf>,

    /// Config file (default: ~/.config/feedmark/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Debug logging is env-driven (RUST_LOG) and off by default, so it
    // never writes over the TUI in normal use.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    let config_path = args
        .config
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let feeds_path = args
        .feeds
        .or(config.feeds_file)
        .unwrap_or_else(|| config_dir.join("feeds.md"));

    let store = FeedStore::new(feeds_path);
    let client = FeedClient::new(Duration::from_secs(config.request_timeout_secs))
        .context("Failed to build HTTP client")?;

    let mut app = App::new(store, client);
    if app.subscriptions.is_empty() {
        app.set_status(format!(
            "No feeds in {}, press 'a' to add one",
            app.store.path().display()
        ));
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
