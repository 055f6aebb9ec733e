use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::aggregate::{self, Summary};
use crate::config::Config;
use crate::ledger::{parse_date, CategoryInput, GoalInput, Ledger, TransactionInput};
use crate::models::{EntryType, Goal};
use crate::projection;
use crate::report::{self, Report};
use crate::store::Store;

/// Flags that take a value; everything else is positional.
const VALUE_FLAGS: &[&str] = &["--from", "--to", "--out", "--current", "--start", "--color"];

const RECENT_COUNT: usize = 5;
const SHORT_ID: usize = 8;

pub(crate) fn as_cli<S: Store>(args: &[String], ledger: &mut Ledger<S>, config: &Config) -> Result<()> {
    let Some(command) = args.get(1) else {
        return cli_dashboard(ledger, config);
    };
    let rest = &args[2..];
    match command.as_str() {
        "dashboard" | "d" => cli_dashboard(ledger, config),
        "summary" | "s" => cli_summary(rest, ledger, config),
        "list" | "ls" => cli_list(rest, ledger, config),
        "add" => cli_add(rest, ledger, config),
        "edit" => cli_edit(rest, ledger, config),
        "rm" => cli_rm(rest, ledger),
        "categories" => cli_categories(ledger),
        "category-add" => cli_category_add(rest, ledger),
        "category-edit" => cli_category_edit(rest, ledger),
        "category-rm" => cli_category_rm(rest, ledger),
        "goals" => cli_goals(ledger, config),
        "goal-add" => cli_goal_add(rest, ledger, config),
        "goal-edit" => cli_goal_edit(rest, ledger, config),
        "goal-rm" => cli_goal_rm(rest, ledger),
        "report" => cli_report(rest, ledger, config),
        "export" => cli_export(rest, ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("PocketLedger — local-only personal finance ledger");
    println!();
    println!("Usage: pocketledger [command]");
    println!();
    println!("Commands:");
    println!("  (none), dashboard                       Balance, recent transactions, goal progress");
    println!("  summary [--from D] [--to D]             Totals and per-category sums");
    println!("  list [--from D] [--to D]                List transactions");
    println!("  add <type> <description> <amount> <category> [date]");
    println!("  edit <id> <type> <description> <amount> <category> <date>");
    println!("  rm <id>                                 Delete a transaction");
    println!("  categories                              List categories");
    println!("  category-add <name> <type> [--color #rrggbb]");
    println!("  category-edit <id> <name> [type] [--color #rrggbb]");
    println!("  category-rm <id>                        Delete an unused category");
    println!("  goals                                   List savings goals");
    println!("  goal-add <name> <target> <end-date> [--current X] [--start D]");
    println!("  goal-edit <id> <name> <target> <end-date> [--current X] [--start D]  (omitted flags keep their value)");
    println!("  goal-rm <id>                            Delete a goal");
    println!("  report [--from D] [--to D] [--out PATH] Paginated report (stdout by default)");
    println!("  export [--from D] [--to D] [path]       Export transactions to CSV");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
    println!();
    println!("<type> is income or expense. Ids may be shortened to any unique prefix.");
}

// ── Argument helpers ──────────────────────────────────────────

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn date_flag(args: &[String], name: &str) -> Result<Option<NaiveDate>> {
    flag(args, name)
        .map(|raw| parse_date(raw).ok_or_else(|| anyhow::anyhow!("{name}: '{raw}' is not a date")))
        .transpose()
}

fn date_range(args: &[String]) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    Ok((date_flag(args, "--from")?, date_flag(args, "--to")?))
}

/// Resolve a full id from an exact id or a unique prefix of one.
fn resolve_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> Result<String> {
    let matches: Vec<&str> = ids.filter(|id| id.starts_with(prefix)).collect();
    if let Some(exact) = matches.iter().find(|id| **id == prefix) {
        return Ok(exact.to_string());
    }
    match matches.as_slice() {
        [] => anyhow::bail!("No entry with id '{prefix}'"),
        [one] => Ok(one.to_string()),
        _ => anyhow::bail!("Id '{prefix}' is ambiguous ({} matches)", matches.len()),
    }
}

fn short(id: &str) -> &str {
    id.get(..SHORT_ID).unwrap_or(id)
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

const BAR_WIDTH: usize = 20;

/// Fixed-width bar for a percentage in `[0, 100]`.
fn progress_bar(percent: Decimal) -> String {
    let filled = (percent * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

// ── Overview ──────────────────────────────────────────────────

fn cli_dashboard<S: Store>(ledger: &Ledger<S>, config: &Config) -> Result<()> {
    let cur = config.currency;
    let summary = Summary::of(ledger.transactions());

    println!("PocketLedger");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", cur.format(summary.income));
    println!("  Expenses:   {}", cur.format(summary.expenses));
    println!("  Balance:    {}", cur.format(summary.balance));

    let recent = ledger.recent_transactions(RECENT_COUNT);
    if !recent.is_empty() {
        println!();
        println!("Recent transactions:");
        for txn in recent {
            println!(
                "  {:<28} {:<16} {:>14}",
                truncate(&txn.description, 28),
                truncate(&txn.category, 16),
                cur.signed(txn.amount, txn.entry_type)
            );
        }
    }

    if !ledger.goals().is_empty() {
        println!();
        println!("Goals:");
        for goal in ledger.goals() {
            let done = projection::completion(goal);
            println!(
                "  {:<28} {} {:>6}",
                truncate(&goal.name, 28),
                progress_bar(done.percent),
                done.label()
            );
        }
    }
    Ok(())
}

fn cli_summary<S: Store>(args: &[String], ledger: &Ledger<S>, config: &Config) -> Result<()> {
    let cur = config.currency;
    let (start, end) = date_range(args)?;
    let txns = aggregate::filter_by_date_range(ledger.transactions(), start, end);
    let summary = Summary::of(txns.iter().copied());

    println!("PocketLedger — {}", report::period_label(start, end));
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", cur.format(summary.income));
    println!("  Expenses:   {}", cur.format(summary.expenses));
    println!("  Balance:    {}", cur.format(summary.balance));
    println!("  Total Txns: {}", summary.count);

    for entry_type in EntryType::all() {
        let groups = aggregate::group_by_category(txns.iter().copied(), *entry_type);
        if groups.is_empty() {
            continue;
        }
        println!();
        match entry_type {
            EntryType::Income => println!("Income by Category:"),
            EntryType::Expense => println!("Spending by Category:"),
        }
        for (name, amount) in &groups {
            println!("  {name:<24} {}", cur.format(*amount));
        }
    }
    Ok(())
}

// ── Transactions ──────────────────────────────────────────────

fn cli_list<S: Store>(args: &[String], ledger: &Ledger<S>, config: &Config) -> Result<()> {
    let (start, end) = date_range(args)?;
    let txns = aggregate::filter_by_date_range(ledger.transactions(), start, end);
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<9} {:<10} {:<28} {:<16} {:>14}",
        "ID", "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(81));
    for txn in txns {
        println!(
            "{:<9} {:<10} {:<28} {:<16} {:>14}",
            short(&txn.id),
            txn.date,
            truncate(&txn.description, 28),
            truncate(&txn.category, 16),
            config.currency.signed(txn.amount, txn.entry_type),
        );
    }
    Ok(())
}

fn transaction_input(fields: &[&str], date: String) -> TransactionInput {
    TransactionInput {
        entry_type: fields[0].to_string(),
        description: fields[1].to_string(),
        amount: fields[2].to_string(),
        category: fields[3].to_string(),
        date,
    }
}

fn cli_add<S: Store>(args: &[String], ledger: &mut Ledger<S>, config: &Config) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 4 {
        anyhow::bail!("Usage: pocketledger add <type> <description> <amount> <category> [date]");
    }
    let date = pos.get(4).map_or_else(today, |d| d.to_string());
    let txn = ledger.create_transaction(&transaction_input(&pos, date))?;
    println!(
        "Added {} {} ({}) [{}]",
        txn.description,
        config.currency.signed(txn.amount, txn.entry_type),
        txn.category,
        short(&txn.id)
    );
    Ok(())
}

fn cli_edit<S: Store>(args: &[String], ledger: &mut Ledger<S>, config: &Config) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 6 {
        anyhow::bail!("Usage: pocketledger edit <id> <type> <description> <amount> <category> <date>");
    }
    let id = resolve_id(pos[0], ledger.transactions().iter().map(|t| t.id.as_str()))?;
    let txn = ledger.update_transaction(&id, &transaction_input(&pos[1..], pos[5].to_string()))?;
    println!(
        "Updated {} {} ({})",
        txn.description,
        config.currency.signed(txn.amount, txn.entry_type),
        txn.category
    );
    Ok(())
}

fn cli_rm<S: Store>(args: &[String], ledger: &mut Ledger<S>) -> Result<()> {
    let Some(prefix) = positionals(args).first().copied() else {
        anyhow::bail!("Usage: pocketledger rm <id>");
    };
    let id = resolve_id(prefix, ledger.transactions().iter().map(|t| t.id.as_str()))?;
    let removed = ledger.delete_transaction(&id)?;
    println!("Deleted {} ({})", removed.description, removed.date);
    Ok(())
}

// ── Categories ────────────────────────────────────────────────

fn cli_categories<S: Store>(ledger: &Ledger<S>) -> Result<()> {
    if ledger.categories().is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<9} {:<24} {:<8} {:<8} Used", "ID", "Name", "Type", "Color");
    println!("{}", "─".repeat(58));
    for entry_type in EntryType::all() {
        for cat in ledger.categories_of(*entry_type) {
            println!(
                "{:<9} {:<24} {:<8} {:<8} {}",
                short(&cat.id),
                truncate(&cat.name, 24),
                cat.entry_type,
                cat.color,
                ledger.reference_count(&cat.name),
            );
        }
    }
    Ok(())
}

fn cli_category_add<S: Store>(args: &[String], ledger: &mut Ledger<S>) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 2 {
        anyhow::bail!("Usage: pocketledger category-add <name> <type> [--color #rrggbb]");
    }
    let cat = ledger.create_category(&CategoryInput {
        name: pos[0].to_string(),
        entry_type: pos[1].to_string(),
        color: flag(args, "--color").unwrap_or_default().to_string(),
    })?;
    println!("Added {} category {} [{}]", cat.entry_type, cat.name, short(&cat.id));
    Ok(())
}

fn cli_category_edit<S: Store>(args: &[String], ledger: &mut Ledger<S>) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 2 {
        anyhow::bail!("Usage: pocketledger category-edit <id> <name> [type] [--color #rrggbb]");
    }
    let id = resolve_id(pos[0], ledger.categories().iter().map(|c| c.id.as_str()))?;
    let current = ledger
        .category(&id)
        .with_context(|| format!("Category {id} disappeared"))?;
    let input = CategoryInput {
        name: pos[1].to_string(),
        entry_type: pos
            .get(2)
            .map_or_else(|| current.entry_type.to_string(), |t| t.to_string()),
        color: flag(args, "--color").unwrap_or(current.color.as_str()).to_string(),
    };
    let old_name = current.name.clone();
    let moved = ledger.reference_count(&old_name);

    let cat = ledger.update_category(&id, &input)?;
    if cat.name != old_name && moved > 0 {
        println!("Renamed {old_name} to {} ({moved} transaction(s) moved)", cat.name);
    } else {
        println!("Updated category {}", cat.name);
    }
    Ok(())
}

fn cli_category_rm<S: Store>(args: &[String], ledger: &mut Ledger<S>) -> Result<()> {
    let Some(prefix) = positionals(args).first().copied() else {
        anyhow::bail!("Usage: pocketledger category-rm <id>");
    };
    let id = resolve_id(prefix, ledger.categories().iter().map(|c| c.id.as_str()))?;
    let removed = ledger.delete_category(&id)?;
    println!("Deleted category {}", removed.name);
    Ok(())
}

// ── Goals ─────────────────────────────────────────────────────

fn cli_goals<S: Store>(ledger: &Ledger<S>, config: &Config) -> Result<()> {
    let cur = config.currency;
    if ledger.goals().is_empty() {
        println!("No goals");
        return Ok(());
    }

    println!(
        "{:<9} {:<20} {:>14} {:>14} {:>14} {:>6} {:>14}  Due",
        "ID", "Name", "Saved", "Target", "Left", "Done", "Per month"
    );
    println!("{}", "─".repeat(111));
    for goal in ledger.goals() {
        let done = projection::completion(goal);
        let marker = if done.is_overfunded() { " +" } else { "" };
        println!(
            "{:<9} {:<20} {:>14} {:>14} {:>14} {:>6} {:>14}  {}{marker}",
            short(&goal.id),
            truncate(&goal.name, 20),
            cur.format(goal.current_amount),
            cur.format(goal.target_amount),
            cur.format(projection::remaining(goal)),
            done.label(),
            cur.format(projection::monthly_savings_needed(goal)),
            goal.end_date,
        );
    }
    Ok(())
}

fn goal_input(args: &[String], fields: &[&str]) -> GoalInput {
    GoalInput {
        name: fields[0].to_string(),
        target_amount: fields[1].to_string(),
        end_date: fields[2].to_string(),
        current_amount: flag(args, "--current").unwrap_or_default().to_string(),
        start_date: flag(args, "--start").unwrap_or_default().to_string(),
    }
}

fn print_goal_plan(goal: &Goal, config: &Config) {
    println!(
        "{}: {} of {} saved, {} per month until {}",
        goal.name,
        config.currency.format(goal.current_amount),
        config.currency.format(goal.target_amount),
        config.currency.format(projection::monthly_savings_needed(goal)),
        goal.end_date
    );
}

fn cli_goal_add<S: Store>(args: &[String], ledger: &mut Ledger<S>, config: &Config) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 3 {
        anyhow::bail!(
            "Usage: pocketledger goal-add <name> <target> <end-date> [--current X] [--start D]"
        );
    }
    let goal = ledger.create_goal(&goal_input(args, &pos))?;
    print_goal_plan(goal, config);
    Ok(())
}

fn cli_goal_edit<S: Store>(args: &[String], ledger: &mut Ledger<S>, config: &Config) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 4 {
        anyhow::bail!(
            "Usage: pocketledger goal-edit <id> <name> <target> <end-date> [--current X] [--start D]"
        );
    }
    let id = resolve_id(pos[0], ledger.goals().iter().map(|g| g.id.as_str()))?;
    let existing = ledger
        .goal(&id)
        .with_context(|| format!("Goal {id} disappeared"))?;
    let mut input = goal_input(args, &pos[1..]);
    if flag(args, "--current").is_none() {
        input.current_amount = existing.current_amount.to_string();
    }
    if flag(args, "--start").is_none() {
        input.start_date = existing.start_date.to_string();
    }
    let goal = ledger.update_goal(&id, &input)?;
    print_goal_plan(goal, config);
    Ok(())
}

fn cli_goal_rm<S: Store>(args: &[String], ledger: &mut Ledger<S>) -> Result<()> {
    let Some(prefix) = positionals(args).first().copied() else {
        anyhow::bail!("Usage: pocketledger goal-rm <id>");
    };
    let id = resolve_id(prefix, ledger.goals().iter().map(|g| g.id.as_str()))?;
    let removed = ledger.delete_goal(&id)?;
    println!("Deleted goal {}", removed.name);
    Ok(())
}

// ── Reports ───────────────────────────────────────────────────

fn cli_report<S: Store>(args: &[String], ledger: &Ledger<S>, config: &Config) -> Result<()> {
    let (start, end) = date_range(args)?;
    let txns = aggregate::filter_by_date_range(ledger.transactions(), start, end);
    let report = Report::build(&txns, start, end, config.currency);

    match flag(args, "--out") {
        Some(path) => {
            let path = shellexpand(path);
            report.write_to(std::path::Path::new(&path))?;
            println!(
                "Wrote {} transaction(s) on {} page(s) to {path}",
                report.summary.count,
                report.pages().len()
            );
        }
        None => print!("{}", report.render()),
    }
    Ok(())
}

fn cli_export<S: Store>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    let (start, end) = date_range(args)?;
    let txns = aggregate::filter_by_date_range(ledger.transactions(), start, end);

    let output_path = positionals(args)
        .first()
        .map(|p| shellexpand(p))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/pocketledger-export.csv")
        });

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    let count = report::write_csv(file, &txns)?;
    if count == 0 {
        println!("No transactions in {}", report::period_label(start, end));
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
