mod aggregate;
mod config;
mod error;
mod ledger;
mod models;
mod projection;
mod report;
mod run;
mod store;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_data_dir()?;

    let db_path = config.db_path();
    let store = store::SqliteStore::open(&db_path)?;
    let mut ledger = ledger::Ledger::load(store)
        .with_context(|| format!("Failed to load ledger from {}", db_path.display()))?;

    run::as_cli(&args, &mut ledger, &config)
}

/// Log to stderr. `POCKETLEDGER_LOG` (or `RUST_LOG`) sets the filter;
/// warnings only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
