use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntryType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: String,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    /// Name of the category, not its id.
    pub(crate) category: String,
    #[serde(rename = "type")]
    pub(crate) entry_type: EntryType,
    pub(crate) date: NaiveDate,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    /// Amount with the sign implied by the entry type.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Income => self.amount,
            EntryType::Expense => -self.amount,
        }
    }
}
