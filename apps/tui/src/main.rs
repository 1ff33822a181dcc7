mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use std::sync::Arc;

use airpower_leaderboard::config::init_app_config;
use airpower_leaderboard::roster::source_from_location;
use airpower_leaderboard::{FleetCache, LoadOrchestrator, LEADERBOARD};
use app::{App, AppEvent};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.headless || args.json || args.export.is_some() || !is_terminal();
    if headless {
        logging::init_stderr_logging(&config)?;
    } else {
        logging::init_file_logging(&config)?;
    }

    let source = source_from_location(&config.roster_source, config.fetch_timeout)?;
    let cache = Arc::new(FleetCache::new());
    let orchestrator = Arc::new(
        LoadOrchestrator::new(source, Arc::clone(&cache))
            .with_timeout(config.fetch_timeout)
            .with_concurrency(config.fetch_concurrency),
    );
    tracing::info!(
        source = %orchestrator.source_description(),
        default = config.default_entity,
        concurrency = config.fetch_concurrency,
        "starting"
    );

    if headless {
        return event::run_headless(&orchestrator, &config, args.json, args.export.as_deref())
            .await;
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let loader = {
        let orchestrator = Arc::clone(&orchestrator);
        let events = events_tx.clone();
        let default_code = config.default_entity;
        tokio::spawn(async move {
            orchestrator.load_default(default_code).await;
            let _ = events.send(AppEvent::DefaultResolved);
            orchestrator.load_remaining(&LEADERBOARD, default_code).await;
            tracing::info!(
                resolved = orchestrator.cache().resolved_count(),
                "background loading finished"
            );
        })
    };

    let default_code = config.default_entity;
    let mut app = App::new(config, orchestrator.source_description(), cache, events_tx);
    app.open_tab(default_code);

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app, &mut events_rx).await;
    terminal::cleanup_terminal_state(true, true);

    loader.abort();
    if let Err(error) = &result {
        tracing::error!(%error, "application exited with an error");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
