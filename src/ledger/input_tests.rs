#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn_input() -> TransactionInput {
    TransactionInput {
        description: "Groceries".into(),
        amount: "42.10".into(),
        category: "Food".into(),
        entry_type: "expense".into(),
        date: "2024-02-10".into(),
    }
}

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_basic() {
    assert_eq!(parse_decimal("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("R$ 1.234,56").unwrap(), dec!(1234.56));
}

#[test]
fn test_parse_decimal_comma_separator() {
    assert_eq!(parse_decimal("12,5").unwrap(), dec!(12.5));
    assert_eq!(parse_decimal("9,99").unwrap(), dec!(9.99));
    assert_eq!(parse_decimal("1,000").unwrap(), dec!(1000));
    assert_eq!(parse_decimal("1,000,000").unwrap(), dec!(1000000));
}

#[test]
fn test_parse_decimal_rejects_garbage() {
    assert!(parse_decimal("").is_none());
    assert!(parse_decimal("   ").is_none());
    assert!(parse_decimal("abc").is_none());
    assert!(parse_decimal("12abc").is_none());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_iso() {
    assert_eq!(parse_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
    assert_eq!(parse_date(" 2024-01-05 ").unwrap(), ymd(2024, 1, 5));
}

#[test]
fn test_parse_date_fallbacks() {
    assert_eq!(parse_date("01/15/2024").unwrap(), ymd(2024, 1, 15));
    assert_eq!(parse_date("15/01/2024").unwrap(), ymd(2024, 1, 15));
    assert_eq!(parse_date("15.01.2024").unwrap(), ymd(2024, 1, 15));
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("2023-02-29").is_none());
    assert!(parse_date("yesterday").is_none());
    assert!(parse_date("").is_none());
}

// ── TransactionInput ──────────────────────────────────────────

#[test]
fn test_transaction_input_valid() {
    let valid = txn_input().validate().unwrap();
    assert_eq!(valid.description, "Groceries");
    assert_eq!(valid.amount, dec!(42.1));
    assert_eq!(valid.entry_type, EntryType::Expense);
    assert_eq!(valid.date, ymd(2024, 2, 10));
}

#[test]
fn test_transaction_input_trims_text() {
    let mut input = txn_input();
    input.description = "  Rent  ".into();
    input.category = " Housing ".into();
    let valid = input.validate().unwrap();
    assert_eq!(valid.description, "Rent");
    assert_eq!(valid.category, "Housing");
}

#[test]
fn test_transaction_input_missing_fields() {
    let cases: [(fn(&mut TransactionInput), &str); 5] = [
        (|i| i.description.clear(), "description"),
        (|i| i.amount.clear(), "amount"),
        (|i| i.category = "  ".into(), "category"),
        (|i| i.entry_type.clear(), "type"),
        (|i| i.date.clear(), "date"),
    ];
    for (blank, expected) in cases {
        let mut input = txn_input();
        blank(&mut input);
        match input.validate() {
            Err(LedgerError::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected validation error on {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_transaction_input_rejects_non_positive_amount() {
    for raw in ["0", "-5", "0.00"] {
        let mut input = txn_input();
        input.amount = raw.into();
        assert!(
            matches!(input.validate(), Err(LedgerError::Validation { field: "amount", .. })),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_transaction_input_amount_ceiling() {
    let mut input = txn_input();
    input.amount = "1000000000000000".into();
    assert_eq!(input.validate().unwrap().amount, MAX_AMOUNT);

    for raw in ["1000000000000000.01", "79228162514264337593543950335"] {
        input.amount = raw.into();
        assert!(
            matches!(input.validate(), Err(LedgerError::Validation { field: "amount", .. })),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_transaction_input_rejects_unknown_type() {
    let mut input = txn_input();
    input.entry_type = "transfer".into();
    assert!(matches!(
        input.validate(),
        Err(LedgerError::Validation { field: "type", .. })
    ));
}

// ── CategoryInput ─────────────────────────────────────────────

#[test]
fn test_category_input_default_color() {
    let input = CategoryInput {
        name: "Pets".into(),
        entry_type: "expense".into(),
        color: String::new(),
    };
    assert_eq!(input.validate().unwrap().color, DEFAULT_COLOR);
}

#[test]
fn test_category_input_color_validation() {
    let mut input = CategoryInput {
        name: "Pets".into(),
        entry_type: "expense".into(),
        color: "#ABC".into(),
    };
    assert_eq!(input.validate().unwrap().color, "#abc");
    input.color = "#12ab9F".into();
    assert_eq!(input.validate().unwrap().color, "#12ab9f");
    input.color = "red".into();
    assert!(matches!(
        input.validate(),
        Err(LedgerError::Validation { field: "color", .. })
    ));
}

#[test]
fn test_category_input_requires_name() {
    let input = CategoryInput {
        name: " ".into(),
        entry_type: "income".into(),
        color: String::new(),
    };
    assert!(matches!(
        input.validate(),
        Err(LedgerError::Validation { field: "name", .. })
    ));
}

// ── GoalInput ─────────────────────────────────────────────────

fn goal_input() -> GoalInput {
    GoalInput {
        name: "Vacation".into(),
        target_amount: "1200".into(),
        current_amount: "200".into(),
        start_date: "2024-01-01".into(),
        end_date: "2024-07-01".into(),
    }
}

#[test]
fn test_goal_input_valid() {
    let valid = goal_input().validate(ymd(2024, 3, 3)).unwrap();
    assert_eq!(valid.target_amount, dec!(1200));
    assert_eq!(valid.current_amount, dec!(200));
    assert_eq!(valid.start_date, ymd(2024, 1, 1));
    assert_eq!(valid.end_date, ymd(2024, 7, 1));
}

#[test]
fn test_goal_input_current_defaults_to_zero() {
    for raw in ["", "n/a", "abc"] {
        let mut input = goal_input();
        input.current_amount = raw.into();
        assert_eq!(
            input.validate(ymd(2024, 3, 3)).unwrap().current_amount,
            Decimal::ZERO
        );
    }
}

#[test]
fn test_goal_input_negative_current_rejected() {
    let mut input = goal_input();
    input.current_amount = "-10".into();
    assert!(matches!(
        input.validate(ymd(2024, 3, 3)),
        Err(LedgerError::Validation { field: "current amount", .. })
    ));
}

#[test]
fn test_goal_input_start_defaults_to_today() {
    let mut input = goal_input();
    input.start_date.clear();
    assert_eq!(
        input.validate(ymd(2024, 3, 3)).unwrap().start_date,
        ymd(2024, 3, 3)
    );
}

#[test]
fn test_goal_input_required_fields() {
    let mut input = goal_input();
    input.end_date.clear();
    assert!(matches!(
        input.validate(ymd(2024, 3, 3)),
        Err(LedgerError::Validation { field: "end date", .. })
    ));

    let mut input = goal_input();
    input.target_amount = "0".into();
    assert!(matches!(
        input.validate(ymd(2024, 3, 3)),
        Err(LedgerError::Validation { field: "target amount", .. })
    ));

    let mut input = goal_input();
    input.name.clear();
    assert!(matches!(
        input.validate(ymd(2024, 3, 3)),
        Err(LedgerError::Validation { field: "name", .. })
    ));
}

#[test]
fn test_goal_input_amount_ceiling() {
    let mut input = goal_input();
    input.target_amount = "79228162514264337593543950335".into();
    assert!(matches!(
        input.validate(ymd(2024, 1, 1)),
        Err(LedgerError::Validation { field: "target amount", .. })
    ));

    let mut input = goal_input();
    input.current_amount = "10000000000000000000000000".into();
    assert!(matches!(
        input.validate(ymd(2024, 1, 1)),
        Err(LedgerError::Validation { field: "current amount", .. })
    ));
}
