//! Tickdown - a keyboard-driven terminal countdown timer
//!
//! This is the main entry point for the tickdown application.

use std::{
    fs::File,
    sync::{Arc, Mutex},
};
use tracing::info;

use tickdown::{
    config::Config,
    state::AppState,
    tasks::ticker_task,
    ui,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // The UI owns the terminal, so logs go to a file
    let log_file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(format!("tickdown={}", config.log_level()))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("Starting tickdown v0.1.0");
    info!("Configuration: count={}s, log_file={}",
          config.count, config.log_file.display());

    // Create application state
    let state = Arc::new(AppState::new(config.count));

    // Start the ticker background task
    let ticker_state = Arc::clone(&state);
    let ticker = tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    // Run the terminal UI until quit or shutdown signal
    let result = ui::run(Arc::clone(&state)).await;

    // The ticker must not outlive the UI session
    ticker.abort();

    info!("Tickdown shutdown complete");
    result
}
