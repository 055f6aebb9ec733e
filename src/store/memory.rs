use anyhow::Result;
use std::collections::HashMap;

use super::Store;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, as a full disk would.
    pub(crate) fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub(crate) fn writes(&self) -> usize {
        self.writes
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("write to '{key}' rejected");
        }
        self.entries.insert(key.to_string(), bytes.to_vec());
        self.writes += 1;
        Ok(())
    }
}
