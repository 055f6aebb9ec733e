//! The ledger: owned state for transactions, categories and goals, plus the
//! rules that keep them consistent with each other.
//!
//! Each mutating method validates first, then changes memory, then writes
//! the touched collection through the store. Nothing is changed when
//! validation fails.

mod input;
mod sync;

use tracing::debug;

use crate::aggregate;
use crate::error::LedgerError;
use crate::models::{Category, EntryType, Goal, Transaction};
use crate::store::Store;

pub(crate) use input::{parse_date, CategoryInput, GoalInput, TransactionInput};
use sync::Collection;

pub(crate) struct Ledger<S: Store> {
    store: S,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    goals: Vec<Goal>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl<S: Store> Ledger<S> {
    // ── Reads ─────────────────────────────────────────────────

    /// All transactions in the order they were entered.
    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub(crate) fn category(&self, id: &str) -> Option<&Category> {
        Category::find_by_id(&self.categories, id)
    }

    pub(crate) fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Categories a transaction of `entry_type` may be filed under.
    pub(crate) fn categories_of(&self, entry_type: EntryType) -> impl Iterator<Item = &Category> + '_ {
        self.categories
            .iter()
            .filter(move |c| c.entry_type == entry_type)
    }

    /// The last `n` transactions entered, newest first.
    pub(crate) fn recent_transactions(&self, n: usize) -> Vec<&Transaction> {
        aggregate::recent(&self.transactions, n)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[cfg(test)]
    pub(crate) fn into_store(self) -> S {
        self.store
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn create_transaction(
        &mut self,
        input: &TransactionInput,
    ) -> Result<&Transaction, LedgerError> {
        let valid = input.validate()?;
        let category = self.resolve_category(&valid.category, valid.entry_type)?;

        let txn = Transaction {
            id: new_id(),
            description: valid.description,
            amount: valid.amount,
            category,
            entry_type: valid.entry_type,
            date: valid.date,
        };
        debug!(id = %txn.id, amount = %txn.amount, "creating transaction");
        self.transactions.push(txn);
        self.sync(Collection::Transactions)?;

        let last = self.transactions.len() - 1;
        Ok(&self.transactions[last])
    }

    pub(crate) fn update_transaction(
        &mut self,
        id: &str,
        input: &TransactionInput,
    ) -> Result<&Transaction, LedgerError> {
        let pos = self.transaction_position(id)?;
        let valid = input.validate()?;
        let category = self.resolve_category(&valid.category, valid.entry_type)?;

        let txn = &mut self.transactions[pos];
        txn.description = valid.description;
        txn.amount = valid.amount;
        txn.category = category;
        txn.entry_type = valid.entry_type;
        txn.date = valid.date;
        debug!(id, "updated transaction");
        self.sync(Collection::Transactions)?;

        Ok(&self.transactions[pos])
    }

    pub(crate) fn delete_transaction(&mut self, id: &str) -> Result<Transaction, LedgerError> {
        let pos = self.transaction_position(id)?;
        let removed = self.transactions.remove(pos);
        debug!(id, "deleted transaction");
        self.sync(Collection::Transactions)?;
        Ok(removed)
    }

    fn transaction_position(&self, id: &str) -> Result<usize, LedgerError> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: "transaction",
                id: id.to_string(),
            })
    }

    /// Canonical name of the category `name` refers to, provided it exists
    /// and carries the same entry type.
    fn resolve_category(&self, name: &str, entry_type: EntryType) -> Result<String, LedgerError> {
        let category = Category::find_by_name(&self.categories, name).ok_or_else(|| {
            LedgerError::validation("category", format!("'{name}' does not exist"))
        })?;
        if category.entry_type != entry_type {
            return Err(LedgerError::validation(
                "category",
                format!(
                    "'{}' is an {} category, not {}",
                    category.name, category.entry_type, entry_type
                ),
            ));
        }
        Ok(category.name.clone())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn create_category(
        &mut self,
        input: &CategoryInput,
    ) -> Result<&Category, LedgerError> {
        let valid = input.validate()?;
        if let Some(existing) = Category::find_by_name(&self.categories, &valid.name) {
            return Err(LedgerError::Duplicate {
                name: existing.name.clone(),
            });
        }

        let category = Category {
            id: new_id(),
            name: valid.name,
            entry_type: valid.entry_type,
            color: valid.color,
        };
        debug!(id = %category.id, name = %category.name, "creating category");
        self.categories.push(category);
        self.sync(Collection::Categories)?;

        let last = self.categories.len() - 1;
        Ok(&self.categories[last])
    }

    /// Update a category. A rename is carried to every transaction filed
    /// under the old name; both collections change together or not at all.
    pub(crate) fn update_category(
        &mut self,
        id: &str,
        input: &CategoryInput,
    ) -> Result<&Category, LedgerError> {
        let pos = self.category_position(id)?;
        let valid = input.validate()?;
        let old = &self.categories[pos];

        if let Some(clash) = self
            .categories
            .iter()
            .find(|c| c.id != old.id && c.same_name(&valid.name))
        {
            return Err(LedgerError::Duplicate {
                name: clash.name.clone(),
            });
        }

        let references = self.reference_count(&old.name);
        if valid.entry_type != old.entry_type && references > 0 {
            return Err(LedgerError::ReferentialIntegrity {
                category: old.name.clone(),
                count: references,
            });
        }

        let renamed = old.name != valid.name;
        let cascaded: Option<Vec<Transaction>> = renamed.then(|| {
            self.transactions
                .iter()
                .cloned()
                .map(|mut t| {
                    if t.category == old.name {
                        t.category = valid.name.clone();
                    }
                    t
                })
                .collect()
        });
        let updated = Category {
            id: old.id.clone(),
            name: valid.name,
            entry_type: valid.entry_type,
            color: valid.color,
        };

        debug!(id, renamed, references, "updating category");
        self.categories[pos] = updated;
        if let Some(transactions) = cascaded {
            self.transactions = transactions;
        }
        let categories = self.sync(Collection::Categories);
        let transactions = if renamed && references > 0 {
            self.sync(Collection::Transactions)
        } else {
            Ok(())
        };
        categories.and(transactions)?;

        Ok(&self.categories[pos])
    }

    pub(crate) fn delete_category(&mut self, id: &str) -> Result<Category, LedgerError> {
        let pos = self.category_position(id)?;
        let name = &self.categories[pos].name;
        let references = self.reference_count(name);
        if references > 0 {
            return Err(LedgerError::ReferentialIntegrity {
                category: name.clone(),
                count: references,
            });
        }

        let removed = self.categories.remove(pos);
        debug!(id, name = %removed.name, "deleted category");
        self.sync(Collection::Categories)?;
        Ok(removed)
    }

    fn category_position(&self, id: &str) -> Result<usize, LedgerError> {
        self.categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: "category",
                id: id.to_string(),
            })
    }

    /// Transactions filed under exactly `name`.
    pub(crate) fn reference_count(&self, name: &str) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.category == name)
            .count()
    }

    // ── Goals ─────────────────────────────────────────────────

    pub(crate) fn create_goal(&mut self, input: &GoalInput) -> Result<&Goal, LedgerError> {
        let valid = input.validate(today())?;
        let goal = Goal {
            id: new_id(),
            name: valid.name,
            target_amount: valid.target_amount,
            current_amount: valid.current_amount,
            start_date: valid.start_date,
            end_date: valid.end_date,
        };
        debug!(id = %goal.id, name = %goal.name, "creating goal");
        self.goals.push(goal);
        self.sync(Collection::Goals)?;

        let last = self.goals.len() - 1;
        Ok(&self.goals[last])
    }

    pub(crate) fn update_goal(&mut self, id: &str, input: &GoalInput) -> Result<&Goal, LedgerError> {
        let pos = self.goal_position(id)?;
        let valid = input.validate(today())?;

        let goal = &mut self.goals[pos];
        goal.name = valid.name;
        goal.target_amount = valid.target_amount;
        goal.current_amount = valid.current_amount;
        goal.start_date = valid.start_date;
        goal.end_date = valid.end_date;
        debug!(id, "updated goal");
        self.sync(Collection::Goals)?;

        Ok(&self.goals[pos])
    }

    pub(crate) fn delete_goal(&mut self, id: &str) -> Result<Goal, LedgerError> {
        let pos = self.goal_position(id)?;
        let removed = self.goals.remove(pos);
        debug!(id, "deleted goal");
        self.sync(Collection::Goals)?;
        Ok(removed)
    }

    fn goal_position(&self, id: &str) -> Result<usize, LedgerError> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: "goal",
                id: id.to_string(),
            })
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
