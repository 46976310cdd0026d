//! Coin Key Puzzle
//!
//! Plays one narrated puzzle, then a large batch of silent ones to hunt for
//! a board where the single-flip encoding fails.

use std::io::Write;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use coin_key::{
    driver::{self, DriverConfig},
    VERSION,
};

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    info!("Coin Key Puzzle v{}", VERSION);

    let config = DriverConfig::from_env().context("reading configuration")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = driver::run(&config, &mut out)?;
    out.flush()?;

    info!(
        "Verified {} puzzles on a {}x{} board (seed {})",
        summary.trials, summary.board_size, summary.board_size, summary.seed
    );
    Ok(())
}
