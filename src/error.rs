use thiserror::Error;

/// Everything the ledger can refuse to do.
///
/// All variants except `Persistence` are raised before any state is touched.
/// `Persistence` means the in-memory change already applied but the store
/// did not take it, so the session and the stored snapshot now disagree
/// until the next successful write.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("a category named '{name}' already exists")]
    Duplicate { name: String },

    #[error("category '{category}' is used by {count} transaction(s)")]
    ReferentialIntegrity { category: String, count: usize },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("failed to persist '{key}'")]
    Persistence {
        key: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl LedgerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: &'static str) -> Self {
        Self::validation(field, "is required")
    }
}
