//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use rust_decimal::Decimal;
use tally_core::test_utils::{date, fixture_today, quiet_ledger, stressed_ledger};
use tally_core::{money, Ledger, Oracle, OracleReport, Policy};
use tempfile::NamedTempFile;

use crate::commands::{self, bar, Inputs};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ledger_file(ledger: &Ledger) -> NamedTempFile {
    write_temp(&serde_json::to_string(ledger).unwrap())
}

fn report_for(ledger: &Ledger) -> OracleReport {
    Oracle::default().analyze(ledger, fixture_today())
}

// ========== Loading Tests ==========

#[test]
fn test_load_inputs_from_ledger_file() {
    let file = ledger_file(&stressed_ledger());
    let inputs = Inputs {
        ledger: Some(file.path()),
        ..Default::default()
    };

    let ledger = commands::load_inputs(&inputs).unwrap();
    assert_eq!(ledger, stressed_ledger());
}

#[test]
fn test_load_inputs_missing_explicit_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let inputs = Inputs {
        ledger: Some(&missing),
        ..Default::default()
    };

    let err = commands::load_inputs(&inputs).unwrap_err();
    assert!(err.to_string().contains("Failed to load ledger"));
}

#[test]
fn test_load_inputs_merges_csv_files() {
    let ledger = ledger_file(&quiet_ledger());
    let expenses = write_temp("date,amount,category,description\n2024-03-18,80,entertainment,Concert\n");
    let incomes = write_temp("date,amount,source,recurring,description\n2024-03-15,300,freelance,no,Logo\n");

    let inputs = Inputs {
        ledger: Some(ledger.path()),
        expenses: Some(expenses.path()),
        incomes: Some(incomes.path()),
    };
    let merged = commands::load_inputs(&inputs).unwrap();

    let quiet = quiet_ledger();
    assert_eq!(merged.expenses.len(), quiet.expenses.len() + 1);
    assert_eq!(merged.incomes.len(), quiet.incomes.len() + 1);
    assert_eq!(merged.goals, quiet.goals);
}

#[test]
fn test_load_inputs_bad_csv_names_the_file() {
    let expenses = write_temp("date,amount,category\nnot-a-date,10,food\n");
    let inputs = Inputs {
        expenses: Some(expenses.path()),
        ..Default::default()
    };

    let err = commands::load_inputs(&inputs).unwrap_err();
    assert!(err.to_string().contains("Failed to import expenses"));
}

#[test]
fn test_resolve_today() {
    assert_eq!(
        commands::resolve_today(Some("2024-03-20")).unwrap(),
        date(2024, 3, 20)
    );
    assert!(commands::resolve_today(Some("03/20/2024")).is_err());
    assert!(commands::resolve_today(None).is_ok());
}

#[test]
fn test_load_policy_from_file() {
    let file = write_temp("[trend]\nflat_tolerance_percent = 10\n");
    let policy = commands::load_policy(Some(file.path())).unwrap();
    assert_eq!(policy.trend.flat_tolerance_percent, 10);
    assert_eq!(policy.insights, Policy::default().insights);
}

#[test]
fn test_load_policy_rejects_invalid_values() {
    let file = write_temp("[insights]\nmax_insights = 0\n");
    assert!(commands::load_policy(Some(file.path())).is_err());
}

// ========== Formatting Tests ==========

#[test]
fn test_money() {
    assert_eq!(money(Decimal::from(1500)), "$1500.00");
    assert_eq!(money(Decimal::new(-2505, 2)), "-$25.05");
    assert_eq!(money(Decimal::new(-1, 3)), "$0.00");
}

#[test]
fn test_bar() {
    assert_eq!(bar(0, 10), "░░░░░░░░░░");
    assert_eq!(bar(50, 10), "█████░░░░░");
    assert_eq!(bar(200, 4), "████");
}

#[test]
fn test_format_summary() {
    let text = commands::format_summary(&report_for(&quiet_ledger()));
    assert!(text.contains("Month 2024-03"));
    assert!(text.contains("$5000.00"));
    assert!(text.contains("$2890.00"));
}

#[test]
fn test_format_summary_empty_ledger() {
    let text = commands::format_summary(&report_for(&Ledger::default()));
    assert!(text.contains("No data yet"));
}

#[test]
fn test_format_health() {
    let text = commands::format_health(&report_for(&quiet_ledger()));
    assert!(text.contains("/100 (Excellent)"));
    assert!(text.contains("Savings rate: 57.8%"));
}

#[test]
fn test_format_trend() {
    let text = commands::format_trend(&report_for(&stressed_ledger()));
    assert!(text.contains("up 86%"));
    assert!(text.contains("$3350.00 this month vs $1800.00 last month"));
    assert!(text.contains("Day 20/31"));
}

#[test]
fn test_format_trend_without_baseline() {
    let ledger = Ledger {
        expenses: vec![tally_core::test_utils::expense(
            40,
            date(2024, 3, 2),
            tally_core::Category::Food,
        )],
        ..Default::default()
    };
    let text = commands::format_trend(&report_for(&ledger));
    assert!(text.contains("no spending last month"));
}

#[test]
fn test_format_goals() {
    let text = commands::format_goals(&report_for(&stressed_ledger()));
    assert!(text.contains("New car"));
    assert!(text.contains("behind"));
    assert!(text.contains("$500.00 of $20000.00"));

    let empty = commands::format_goals(&report_for(&Ledger::default()));
    assert!(empty.contains("No active goals"));
}

#[test]
fn test_format_insights() {
    let text = commands::format_insights(&report_for(&stressed_ledger()));
    assert!(text.contains("Spending exceeds income"));
    assert_eq!(text.matches("🚨").count(), 2);

    let quiet = commands::format_insights(&report_for(&quiet_ledger()));
    assert!(quiet.contains("All good"));
}

// ========== Command Tests ==========

#[test]
fn test_commands_run_in_both_modes() {
    let report = report_for(&stressed_ledger());
    for json in [false, true] {
        assert!(commands::cmd_report(&report, json).is_ok());
        assert!(commands::cmd_health(&report, json).is_ok());
        assert!(commands::cmd_trend(&report, json).is_ok());
        assert!(commands::cmd_goals(&report, json).is_ok());
        assert!(commands::cmd_insights(&report, json).is_ok());
        assert!(commands::cmd_policy(&Policy::default(), json).is_ok());
    }
}

#[test]
fn test_policy_output_round_trips() {
    let policy = Policy::default();
    let text = toml::to_string_pretty(&policy).unwrap();
    let file = write_temp(&text);
    assert_eq!(commands::load_policy(Some(file.path())).unwrap(), policy);
}
