use serde::{Deserialize, Serialize};

use super::EntryType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) entry_type: EntryType,
    #[serde(default)]
    pub(crate) color: String,
}

/// Seeded on first run, and whenever the stored categories are unreadable.
const STARTER_SET: &[(&str, &str, EntryType, &str)] = &[
    ("1", "Food", EntryType::Expense, "#ef4444"),
    ("2", "Transport", EntryType::Expense, "#f97316"),
    ("3", "Housing", EntryType::Expense, "#eab308"),
    ("4", "Leisure", EntryType::Expense, "#22c55e"),
    ("5", "Salary", EntryType::Income, "#3b82f6"),
    ("6", "Freelance", EntryType::Income, "#8b5cf6"),
];

impl Category {
    pub(crate) fn starter_set() -> Vec<Category> {
        STARTER_SET
            .iter()
            .map(|&(id, name, entry_type, color)| Category {
                id: id.to_string(),
                name: name.to_string(),
                entry_type,
                color: color.to_string(),
            })
            .collect()
    }

    /// Whether `name` refers to this category, ignoring case.
    pub(crate) fn same_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub(crate) fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.same_name(name))
    }

    /// Find a category by ID in a slice.
    pub(crate) fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
