//! Raw form input and its coercion into typed values.
//!
//! Every field arrives as text, the way a form or the command line hands it
//! over. Nothing here looks at ledger state; cross-collection checks happen
//! in [`super::Ledger`].

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::LedgerError;
use crate::models::EntryType;

const DEFAULT_COLOR: &str = "#ef4444";

/// 10^15, the largest amount a single field may carry. Far below
/// `Decimal::MAX`, so totals over any realistic number of entries fit.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0x_A4C6_8000, 0x_0003_8D7E, 0, false, 0);

#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionInput {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) entry_type: String,
    pub(crate) date: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryInput {
    pub(crate) name: String,
    pub(crate) entry_type: String,
    /// Empty means the default color.
    pub(crate) color: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct GoalInput {
    pub(crate) name: String,
    pub(crate) target_amount: String,
    /// Empty or non-numeric means zero.
    pub(crate) current_amount: String,
    /// Empty means today.
    pub(crate) start_date: String,
    pub(crate) end_date: String,
}

#[derive(Debug)]
pub(super) struct ValidTransaction {
    pub(super) description: String,
    pub(super) amount: Decimal,
    pub(super) category: String,
    pub(super) entry_type: EntryType,
    pub(super) date: NaiveDate,
}

#[derive(Debug)]
pub(super) struct ValidCategory {
    pub(super) name: String,
    pub(super) entry_type: EntryType,
    pub(super) color: String,
}

#[derive(Debug)]
pub(super) struct ValidGoal {
    pub(super) name: String,
    pub(super) target_amount: Decimal,
    pub(super) current_amount: Decimal,
    pub(super) start_date: NaiveDate,
    pub(super) end_date: NaiveDate,
}

impl TransactionInput {
    pub(super) fn validate(&self) -> Result<ValidTransaction, LedgerError> {
        let description = required("description", &self.description)?;
        let amount = positive_amount("amount", &self.amount)?;
        let category = required("category", &self.category)?;
        let entry_type = entry_type(&self.entry_type)?;
        let date = date("date", &self.date)?;
        Ok(ValidTransaction {
            description,
            amount,
            category,
            entry_type,
            date,
        })
    }
}

impl CategoryInput {
    pub(super) fn validate(&self) -> Result<ValidCategory, LedgerError> {
        let name = required("name", &self.name)?;
        let entry_type = entry_type(&self.entry_type)?;
        let color = match self.color.trim() {
            "" => DEFAULT_COLOR.to_string(),
            c if is_color(c) => c.to_lowercase(),
            c => {
                return Err(LedgerError::validation(
                    "color",
                    format!("'{c}' is not a #rgb or #rrggbb color"),
                ))
            }
        };
        Ok(ValidCategory {
            name,
            entry_type,
            color,
        })
    }
}

impl GoalInput {
    pub(super) fn validate(&self, today: NaiveDate) -> Result<ValidGoal, LedgerError> {
        let name = required("name", &self.name)?;
        let target_amount = positive_amount("target amount", &self.target_amount)?;
        let current_amount = parse_decimal(&self.current_amount).unwrap_or(Decimal::ZERO);
        if current_amount < Decimal::ZERO {
            return Err(LedgerError::validation(
                "current amount",
                "cannot be negative",
            ));
        }
        if current_amount > MAX_AMOUNT {
            return Err(too_large("current amount"));
        }
        let start_date = if self.start_date.trim().is_empty() {
            today
        } else {
            date("start date", &self.start_date)?
        };
        let end_date = date("end date", &self.end_date)?;
        Ok(ValidGoal {
            name,
            target_amount,
            current_amount,
            start_date,
            end_date,
        })
    }
}

fn required(field: &'static str, raw: &str) -> Result<String, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::missing(field));
    }
    Ok(trimmed.to_string())
}

fn positive_amount(field: &'static str, raw: &str) -> Result<Decimal, LedgerError> {
    if raw.trim().is_empty() {
        return Err(LedgerError::missing(field));
    }
    let amount = parse_decimal(raw)
        .ok_or_else(|| LedgerError::validation(field, format!("'{}' is not a number", raw.trim())))?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(field, "must be greater than zero"));
    }
    if amount > MAX_AMOUNT {
        return Err(too_large(field));
    }
    Ok(amount.normalize())
}

fn too_large(field: &'static str) -> LedgerError {
    LedgerError::validation(field, format!("must not exceed {MAX_AMOUNT}"))
}

fn entry_type(raw: &str) -> Result<EntryType, LedgerError> {
    if raw.trim().is_empty() {
        return Err(LedgerError::missing("type"));
    }
    EntryType::parse(raw).ok_or_else(|| {
        LedgerError::validation("type", format!("'{}' is neither income nor expense", raw.trim()))
    })
}

fn date(field: &'static str, raw: &str) -> Result<NaiveDate, LedgerError> {
    if raw.trim().is_empty() {
        return Err(LedgerError::missing(field));
    }
    parse_date(raw).ok_or_else(|| {
        LedgerError::validation(field, format!("'{}' is not a calendar date", raw.trim()))
    })
}

/// Parse a user-typed amount. Accepts currency symbols and either `,` or `.`
/// as the decimal separator; when both appear, the last one is decimal.
fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !matches!(c, '$' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(comma), None) if is_decimal_comma(&cleaned, comma) => cleaned.replace(',', "."),
        (Some(_), None) => cleaned.replace(',', ""),
        _ => cleaned,
    };
    Decimal::from_str(&normalized).ok()
}

/// A lone comma followed by one or two digits ("12,5", "9,99") is a decimal
/// separator; "1,000" is grouping.
fn is_decimal_comma(s: &str, comma: usize) -> bool {
    let tail = &s[comma + 1..];
    s.matches(',').count() == 1 && (1..=2).contains(&tail.len())
}

/// Parse a calendar date. ISO first, then the common US and European forms.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn is_color(s: &str) -> bool {
    static COLOR: OnceLock<Option<Regex>> = OnceLock::new();
    COLOR
        .get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
