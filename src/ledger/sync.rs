//! Write-through persistence of the three collections.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::Ledger;
use crate::error::LedgerError;
use crate::models::Category;
use crate::store::Store;

/// A persisted collection and the store key it lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    Transactions,
    Categories,
    Goals,
}

impl Collection {
    pub(crate) fn key(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Categories => "categories",
            Self::Goals => "goals",
        }
    }
}

/// What a store key held at startup.
enum Stored<T> {
    Absent,
    Malformed,
    Present(Vec<T>),
}

impl<S: Store> Ledger<S> {
    /// Load the ledger from `store`.
    ///
    /// Missing transactions or goals start empty. Missing categories are
    /// seeded with the starter set and written back at once. Stored data
    /// that no longer parses is logged and treated as missing. Only a failing
    /// store is an error.
    pub(crate) fn load(store: S) -> Result<Self, LedgerError> {
        let transactions = match read(&store, Collection::Transactions)? {
            Stored::Present(items) => items,
            Stored::Absent | Stored::Malformed => Vec::new(),
        };
        let goals = match read(&store, Collection::Goals)? {
            Stored::Present(items) => items,
            Stored::Absent | Stored::Malformed => Vec::new(),
        };
        let (categories, seeded) = match read(&store, Collection::Categories)? {
            Stored::Present(items) => (items, false),
            Stored::Absent | Stored::Malformed => (Category::starter_set(), true),
        };

        let mut ledger = Self {
            store,
            transactions,
            categories,
            goals,
        };
        if seeded {
            info!(count = ledger.categories.len(), "seeding starter categories");
            ledger.sync(Collection::Categories)?;
        }
        Ok(ledger)
    }

    /// Serialize one collection in full and hand it to the store.
    pub(super) fn sync(&mut self, collection: Collection) -> Result<(), LedgerError> {
        let bytes = match collection {
            Collection::Transactions => encode(collection, &self.transactions)?,
            Collection::Categories => encode(collection, &self.categories)?,
            Collection::Goals => encode(collection, &self.goals)?,
        };
        self.store
            .set(collection.key(), &bytes)
            .map_err(|source| LedgerError::Persistence {
                key: collection.key(),
                source,
            })
    }
}

fn read<S: Store, T: DeserializeOwned>(
    store: &S,
    collection: Collection,
) -> Result<Stored<T>, LedgerError> {
    let key = collection.key();
    let Some(bytes) = store
        .get(key)
        .map_err(|source| LedgerError::Persistence { key, source })?
    else {
        return Ok(Stored::Absent);
    };
    match serde_json::from_slice(&bytes) {
        Ok(items) => Ok(Stored::Present(items)),
        Err(e) => {
            warn!(key, error = %e, "stored data is unreadable, starting with an empty collection");
            Ok(Stored::Malformed)
        }
    }
}

fn encode<T: Serialize>(collection: Collection, items: &[T]) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(items).map_err(|e| LedgerError::Persistence {
        key: collection.key(),
        source: e.into(),
    })
}
