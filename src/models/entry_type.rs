use serde::{Deserialize, Serialize};

/// Direction of money flow. Amounts are always stored positive and take
/// their sign from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "exp" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [EntryType] {
        &[Self::Income, Self::Expense]
    }

    /// `+` for income, `-` for expense.
    pub(crate) fn sign(&self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
