#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_goal(target: Decimal, current: Decimal, start: NaiveDate, end: NaiveDate) -> Goal {
    Goal {
        id: "g".into(),
        name: "Goal".into(),
        target_amount: target,
        current_amount: current,
        start_date: start,
        end_date: end,
    }
}

// ── month_span ────────────────────────────────────────────────

#[test]
fn test_month_span_ignores_day() {
    assert_eq!(month_span(ymd(2024, 1, 31), ymd(2024, 2, 1)), 1);
    assert_eq!(month_span(ymd(2024, 1, 1), ymd(2024, 1, 31)), 0);
}

#[test]
fn test_month_span_across_years() {
    assert_eq!(month_span(ymd(2023, 11, 15), ymd(2025, 2, 1)), 15);
    assert_eq!(month_span(ymd(2024, 6, 1), ymd(2023, 6, 1)), -12);
}

// ── monthly_savings_needed ────────────────────────────────────

#[test]
fn test_monthly_savings_reference_goal() {
    let goal = make_goal(dec!(1200), dec!(200), ymd(2024, 1, 1), ymd(2024, 7, 1));
    assert_eq!(monthly_savings_needed(&goal).round_dp(2), dec!(166.67));
}

#[test]
fn test_monthly_savings_exact_division() {
    let goal = make_goal(dec!(1200), dec!(0), ymd(2024, 1, 1), ymd(2025, 1, 1));
    assert_eq!(monthly_savings_needed(&goal), dec!(100));
}

#[test]
fn test_monthly_savings_zero_span() {
    let goal = make_goal(dec!(1200), dec!(0), ymd(2024, 3, 1), ymd(2024, 3, 28));
    assert_eq!(monthly_savings_needed(&goal), Decimal::ZERO);
}

#[test]
fn test_monthly_savings_negative_span() {
    let goal = make_goal(dec!(1200), dec!(0), ymd(2024, 3, 1), ymd(2023, 12, 1));
    assert_eq!(monthly_savings_needed(&goal), Decimal::ZERO);
}

#[test]
fn test_monthly_savings_overfunded_is_negative() {
    let goal = make_goal(dec!(1000), dec!(1300), ymd(2024, 1, 1), ymd(2024, 4, 1));
    assert_eq!(monthly_savings_needed(&goal), dec!(-100));
}

#[test]
fn test_remaining_floors_at_zero() {
    let start = ymd(2024, 1, 1);
    let end = ymd(2024, 4, 1);
    assert_eq!(remaining(&make_goal(dec!(1000), dec!(250), start, end)), dec!(750));
    assert_eq!(remaining(&make_goal(dec!(1000), dec!(1300), start, end)), Decimal::ZERO);
}

// ── completion ────────────────────────────────────────────────

#[test]
fn test_completion_partial() {
    let goal = make_goal(dec!(1200), dec!(300), ymd(2024, 1, 1), ymd(2024, 7, 1));
    let c = completion(&goal);
    assert_eq!(c.ratio, dec!(25));
    assert_eq!(c.percent, dec!(25));
    assert!(!c.is_overfunded());
    assert_eq!(c.label(), "25%");
}

#[test]
fn test_completion_overfunded_is_clamped_for_display() {
    let goal = make_goal(dec!(500), dec!(800), ymd(2024, 1, 1), ymd(2024, 7, 1));
    let c = completion(&goal);
    assert_eq!(c.ratio, dec!(160));
    assert_eq!(c.percent, dec!(100));
    assert!(c.is_overfunded());
    assert_eq!(c.label(), "160%");
}

#[test]
fn test_completion_label_rounds_half_up() {
    let goal = make_goal(dec!(200), dec!(1), ymd(2024, 1, 1), ymd(2024, 7, 1));
    assert_eq!(completion(&goal).label(), "1%");
    let goal = make_goal(dec!(3), dec!(2), ymd(2024, 1, 1), ymd(2024, 7, 1));
    assert_eq!(completion(&goal).label(), "67%");
}

#[test]
fn test_completion_zero_target() {
    let goal = make_goal(Decimal::ZERO, dec!(10), ymd(2024, 1, 1), ymd(2024, 7, 1));
    let c = completion(&goal);
    assert_eq!(c.ratio, Decimal::ZERO);
    assert_eq!(c.percent, Decimal::ZERO);
}

#[test]
fn test_completion_saturates_for_tiny_target() {
    let goal = make_goal(dec!(0.01), dec!(10000000000000000000000000), ymd(2024, 1, 1), ymd(2024, 7, 1));
    let c = completion(&goal);
    assert_eq!(c.ratio, Decimal::MAX);
    assert_eq!(c.percent, dec!(100));
    assert!(c.is_overfunded());
}
