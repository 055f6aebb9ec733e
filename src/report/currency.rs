use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::EntryType;

/// How amounts are written for one currency and locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CurrencyFormat {
    pub(crate) code: &'static str,
    symbol: &'static str,
    thousands: char,
    decimal: char,
    /// Put a space between the symbol and the digits.
    spaced: bool,
}

pub(crate) const USD: CurrencyFormat = CurrencyFormat {
    code: "USD",
    symbol: "$",
    thousands: ',',
    decimal: '.',
    spaced: false,
};

pub(crate) const BRL: CurrencyFormat = CurrencyFormat {
    code: "BRL",
    symbol: "R$",
    thousands: '.',
    decimal: ',',
    spaced: true,
};

impl Default for CurrencyFormat {
    fn default() -> Self {
        BRL
    }
}

impl CurrencyFormat {
    pub(crate) fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(USD),
            "BRL" => Some(BRL),
            _ => None,
        }
    }

    /// Two decimals, grouped thousands, currency symbol.
    /// e.g. `1234567.891` → `"$1,234,567.89"`, `-5` → `"-$5.00"`
    pub(crate) fn format(&self, val: Decimal) -> String {
        let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let abs = rounded.abs();
        let formatted = format!("{abs:.2}");
        let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

        let grouped: String = int_part
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(&self.thousands.to_string());

        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        let space = if self.spaced { " " } else { "" };
        format!(
            "{sign}{}{space}{grouped}{}{dec_part}",
            self.symbol, self.decimal
        )
    }

    /// A stored (always positive) amount with the sign its entry type implies,
    /// e.g. `"+$10.00"` or `"-$4.50"`.
    pub(crate) fn signed(&self, amount: Decimal, entry_type: EntryType) -> String {
        format!("{}{}", entry_type.sign(), self.format(amount.abs()))
    }
}
