//! Totals, balances and groupings computed from the transaction list.
//!
//! Nothing is cached: every call walks the transactions it is given. Sums
//! saturate at the `Decimal` bounds instead of overflowing.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{EntryType, Transaction};

/// Sum of the amounts of every transaction of `entry_type`.
pub(crate) fn total_by_type<'a>(
    txns: impl IntoIterator<Item = &'a Transaction>,
    entry_type: EntryType,
) -> Decimal {
    txns.into_iter()
        .filter(|t| t.entry_type == entry_type)
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount))
}

/// Income minus expenses.
pub(crate) fn balance<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    txns.into_iter()
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.signed_amount()))
}

/// Per-category sums for one entry type, in the order each category first
/// shows up. Categories with no matching transaction are left out.
pub(crate) fn group_by_category<'a>(
    txns: impl IntoIterator<Item = &'a Transaction>,
    entry_type: EntryType,
) -> Vec<(String, Decimal)> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for txn in txns.into_iter().filter(|t| t.entry_type == entry_type) {
        match groups.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, sum)) => *sum = sum.saturating_add(txn.amount),
            None => groups.push((txn.category.clone(), txn.amount)),
        }
    }
    groups
}

/// Transactions dated within `[start, end]`, both ends inclusive and
/// optional, in their original order.
pub(crate) fn filter_by_date_range(
    txns: &[Transaction],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&Transaction> {
    txns.iter()
        .filter(|t| start.map_or(true, |s| t.date >= s))
        .filter(|t| end.map_or(true, |e| t.date <= e))
        .collect()
}

/// The last `n` transactions entered, newest first.
pub(crate) fn recent(txns: &[Transaction], n: usize) -> Vec<&Transaction> {
    txns.iter().rev().take(n).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) count: usize,
}

impl Summary {
    pub(crate) fn of<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut summary = Self::default();
        for txn in txns {
            match txn.entry_type {
                EntryType::Income => summary.income = summary.income.saturating_add(txn.amount),
                EntryType::Expense => {
                    summary.expenses = summary.expenses.saturating_add(txn.amount)
                }
            }
            summary.count += 1;
        }
        summary.balance = summary.income.saturating_sub(summary.expenses);
        summary
    }
}
