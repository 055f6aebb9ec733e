use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::models::Goal;

/// Whole months from `start` to `end`, ignoring the day of month.
/// Negative when `end` is in an earlier month than `start`.
pub(crate) fn month_span(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// How much has to be put aside each month to reach the target by the end
/// date. Zero when the goal is due this month or already past due. Negative
/// when the goal is overfunded.
pub(crate) fn monthly_savings_needed(goal: &Goal) -> Decimal {
    let span = month_span(goal.start_date, goal.end_date);
    if span <= 0 {
        debug!(goal = %goal.name, span, "no whole months left, nothing to save monthly");
        return Decimal::ZERO;
    }
    goal.target_amount.saturating_sub(goal.current_amount) / Decimal::from(span)
}

/// Amount still missing, never below zero.
pub(crate) fn remaining(goal: &Goal) -> Decimal {
    goal.target_amount
        .saturating_sub(goal.current_amount)
        .max(Decimal::ZERO)
}

/// Progress towards a goal, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Completion {
    /// `current / target * 100`, unclamped.
    pub(crate) ratio: Decimal,
    /// `ratio` clamped to `[0, 100]`, for progress bars.
    pub(crate) percent: Decimal,
}

impl Completion {
    pub(crate) fn is_overfunded(&self) -> bool {
        self.ratio > Decimal::ONE_HUNDRED
    }

    /// Whole-percent label, rounded half up from the unclamped ratio.
    pub(crate) fn label(&self) -> String {
        let whole = self
            .ratio
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{whole}%")
    }
}

pub(crate) fn completion(goal: &Goal) -> Completion {
    if goal.target_amount <= Decimal::ZERO {
        return Completion {
            ratio: Decimal::ZERO,
            percent: Decimal::ZERO,
        };
    }
    let ratio = goal
        .current_amount
        .checked_div(goal.target_amount)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX);
    Completion {
        ratio,
        percent: ratio.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
