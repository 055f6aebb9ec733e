#[cfg(test)]
mod memory;
mod schema;
mod sqlite;

use anyhow::Result;

#[cfg(test)]
pub(crate) use memory::MemoryStore;
pub(crate) use sqlite::SqliteStore;

/// Durable byte store keyed by collection name.
///
/// Reads and writes are synchronous; a write has either landed when `set`
/// returns `Ok` or it has not landed at all.
pub(crate) trait Store {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

#[cfg(test)]
mod tests;
