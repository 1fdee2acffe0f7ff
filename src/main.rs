//! Kibitz - automatic computer-analysis requests for chess game pages.
//!
//! Main entry point for the Kibitz CLI.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kibitz_cdp::{CdpClient, PageInfo, PageSession};
use kibitz_config::Settings;
use kibitz_core::{
    CdpPage, CycleOutcome, Driver, GamePage, HttpAnalysisBackend, NavWatcher, Orchestrator,
    PreferenceSource, game_path,
};

/// Kibitz CLI.
#[derive(Parser)]
#[command(name = "kibitz")]
#[command(about = "Automatically request computer analysis on chess game pages")]
#[command(version)]
struct Cli {
    /// Settings file path (defaults to the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Browser remote debugging endpoint (overrides settings)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the browser and request analysis on every finished game page
    Watch,
    /// Request analysis on the current page once, regardless of the
    /// auto-trigger flag
    Trigger,
    /// Turn automatic requests on
    Enable,
    /// Turn automatic requests off
    Disable,
    /// Show the persisted settings
    Status,
}

/// Reads the auto-trigger flag from the settings file on every cycle, so a
/// concurrent `kibitz disable` takes effect on the next navigation.
struct FilePrefs {
    path: PathBuf,
}

#[async_trait]
impl PreferenceSource for FilePrefs {
    async fn auto_trigger(&self) -> bool {
        match Settings::load(&self.path) {
            Ok(settings) => settings.auto_trigger,
            Err(e) => {
                warn!("failed to read settings, assuming enabled: {}", e);
                true
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kibitz=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };

    let mut settings = Settings::load(&config_path)?;
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }

    match cli.command {
        Commands::Watch => watch(settings, config_path).await,
        Commands::Trigger => trigger(settings).await,
        Commands::Enable => set_auto_trigger(settings, &config_path, true),
        Commands::Disable => set_auto_trigger(settings, &config_path, false),
        Commands::Status => status(&settings, &config_path),
    }
}

/// Attach to the most relevant tab: a game page on the site if one is open,
/// otherwise any tab on the site, otherwise the first ordinary tab.
fn pick_target<'a>(pages: &'a [PageInfo], site: &str) -> Option<&'a PageInfo> {
    let tabs = || pages.iter().filter(|p| p.page_type == "page");

    tabs()
        .find(|p| {
            p.url
                .strip_prefix(site)
                .is_some_and(|path| game_path(path).is_some())
        })
        .or_else(|| tabs().find(|p| p.url.starts_with(site)))
        .or_else(|| tabs().next())
}

async fn attach(settings: &Settings) -> Result<(CdpClient, Arc<PageSession>)> {
    let client = CdpClient::connect(&settings.endpoint)
        .await
        .with_context(|| format!("connecting to browser at {}", settings.endpoint))?;

    let pages = client.list_pages().await?;
    let target = pick_target(&pages, &settings.site)
        .with_context(|| format!("no open tab found (is {} open?)", settings.site))?;

    info!("attaching to tab: {}", target.url);
    let session = client.attach(&target.id).await?;
    Ok((client, Arc::new(session)))
}

async fn watch(settings: Settings, config_path: PathBuf) -> Result<()> {
    // The client owns the WebSocket; keep it alive for the whole run.
    let (client, session) = attach(&settings).await?;

    let page: Arc<dyn GamePage> = Arc::new(CdpPage::new(session));
    let backend = Arc::new(HttpAnalysisBackend::new(&settings.site)?);
    let generation = Arc::new(AtomicU64::new(0));

    let orchestrator = Arc::new(Orchestrator::new(
        page.clone(),
        backend,
        generation.clone(),
    ));
    let driver = Driver::new(orchestrator, Arc::new(FilePrefs { path: config_path }));
    let (events, watcher_handle) = NavWatcher::new(page, generation).spawn();

    info!("watching for game pages (ctrl-c to stop)");
    tokio::select! {
        _ = driver.run(events) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }

    watcher_handle.abort();
    drop(client);
    Ok(())
}

async fn trigger(settings: Settings) -> Result<()> {
    let (client, session) = attach(&settings).await?;

    let page: Arc<dyn GamePage> = Arc::new(CdpPage::new(session));
    let backend = Arc::new(HttpAnalysisBackend::new(&settings.site)?);
    let orchestrator = Orchestrator::new(page, backend, Arc::new(AtomicU64::new(0)));

    let outcome = orchestrator.run_cycle(0, true).await?;
    match outcome {
        CycleOutcome::Requested => println!("Analysis requested."),
        CycleOutcome::AlreadyActivated => println!("Game already has analysis."),
        CycleOutcome::NotGamePage => println!("Current tab is not a game page."),
        CycleOutcome::Exhausted => println!("Could not trigger an analysis request."),
        CycleOutcome::Disabled | CycleOutcome::Stale => {}
    }

    drop(client);
    Ok(())
}

fn set_auto_trigger(mut settings: Settings, path: &PathBuf, enabled: bool) -> Result<()> {
    settings.auto_trigger = enabled;
    settings.save(path)?;
    println!(
        "Auto-analysis {}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn status(settings: &Settings, path: &PathBuf) -> Result<()> {
    println!("settings file: {}", path.display());
    println!("auto_trigger:  {}", settings.auto_trigger);
    println!("endpoint:      {}", settings.endpoint);
    println!("site:          {}", settings.site);
    Ok(())
}
