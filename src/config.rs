use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::report::CurrencyFormat;

pub(crate) const DATA_DIR_ENV: &str = "POCKETLEDGER_DATA_DIR";
pub(crate) const CURRENCY_ENV: &str = "POCKETLEDGER_CURRENCY";
pub(crate) const LOG_ENV: &str = "POCKETLEDGER_LOG";

const DB_FILE: &str = "pocketledger.db";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) currency: CurrencyFormat,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Build the config from a variable lookup. Unset or blank variables
    /// fall back to defaults; an unknown currency code is an error.
    fn resolve(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let set = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let data_dir = match set(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let currency = match set(CURRENCY_ENV) {
            Some(code) => CurrencyFormat::parse(&code).ok_or_else(|| {
                anyhow::anyhow!("{CURRENCY_ENV}: unsupported currency '{code}' (use USD or BRL)")
            })?,
            None => CurrencyFormat::default(),
        };

        Ok(Self { data_dir, currency })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "pocketledger", "PocketLedger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
