//! Printable reports over a date-filtered transaction list.

mod currency;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;

use crate::aggregate::Summary;
use crate::models::Transaction;

pub(crate) use currency::CurrencyFormat;

/// Transaction lines per page.
pub(crate) const LINES_PER_PAGE: usize = 35;

const TITLE: &str = "Financial Report";
const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, Clone)]
pub(crate) struct Report {
    pub(crate) title: String,
    pub(crate) period: String,
    pub(crate) summary: Summary,
    totals: String,
    pages: Vec<Vec<String>>,
}

impl Report {
    /// Lay out `txns`, which the caller has already filtered to
    /// `[start, end]`. The order of `txns` is kept.
    pub(crate) fn build(
        txns: &[&Transaction],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        currency: CurrencyFormat,
    ) -> Self {
        let summary = Summary::of(txns.iter().copied());
        let totals = format!(
            "Income: {}   Expenses: {}   Balance: {}",
            currency.format(summary.income),
            currency.format(summary.expenses),
            currency.format(summary.balance),
        );
        let lines: Vec<String> = txns
            .iter()
            .map(|t| transaction_line(t, currency))
            .collect();
        let pages = if lines.is_empty() {
            vec![vec!["No transactions in this period.".to_string()]]
        } else {
            lines.chunks(LINES_PER_PAGE).map(<[String]>::to_vec).collect()
        };

        Self {
            title: TITLE.to_string(),
            period: period_label(start, end),
            summary,
            totals,
            pages,
        }
    }

    pub(crate) fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    /// Plain text, pages separated by form feeds, each ending in a
    /// `Page n/m` footer.
    pub(crate) fn render(&self) -> String {
        let total = self.pages.len();
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i == 0 {
                out.push_str(&format!(
                    "{}\n{}\n{}\n\nTransactions:\n",
                    self.title, self.period, self.totals
                ));
            } else {
                out.push(PAGE_BREAK);
                out.push('\n');
            }
            for line in page {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&format!("\nPage {}/{}\n", i + 1, total));
        }
        out
    }

    pub(crate) fn write_to(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}

/// `Period: <start> to <end>`, naming open bounds.
pub(crate) fn period_label(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let start = start.map_or_else(|| "beginning".to_string(), |d| d.to_string());
    let end = end.map_or_else(|| "end".to_string(), |d| d.to_string());
    format!("Period: {start} to {end}")
}

/// `date - description - category - ±amount`
pub(crate) fn transaction_line(txn: &Transaction, currency: CurrencyFormat) -> String {
    format!(
        "{} - {} - {} - {}",
        txn.date,
        txn.description,
        txn.category,
        currency.signed(txn.amount, txn.entry_type)
    )
}

/// Write `txns` as CSV with a header row. Returns the number of rows written.
pub(crate) fn write_csv<W: Write>(writer: W, txns: &[&Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "description", "category", "type", "amount"])
        .context("Failed to write CSV header")?;
    for txn in txns {
        wtr.write_record([
            txn.date.to_string(),
            txn.description.clone(),
            txn.category.clone(),
            txn.entry_type.to_string(),
            format!("{:.2}", txn.amount),
        ])
        .with_context(|| format!("Failed to write transaction {}", txn.id))?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(txns.len())
}
