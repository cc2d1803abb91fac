//! Tally Core Library
//!
//! The personal finance insight engine behind the `tally` CLI:
//! - Ledger models (incomes, expenses, goals, budgets, bill reminders)
//! - JSON ledger and CSV import
//! - Monthly snapshots of the ledger
//! - Health score, spending trend and goal progress analysis
//! - Rule-based insight engine with ranking
//! - Tunable policy thresholds with an embedded default

pub mod clock;
pub mod config;
pub mod error;
pub mod goals;
pub mod health;
pub mod import;
pub mod insights;
pub mod models;
pub mod oracle;
pub mod snapshot;
pub mod trend;

/// Ledger fixtures shared by unit, integration and CLI tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::{GoalPolicy, HealthPolicy, InsightPolicy, Policy, TrendPolicy};
pub use error::{Error, Result};
pub use goals::{analyze_goal, analyze_goals, GoalAnalysis};
pub use health::{score_health, Grade, HealthBreakdown, HealthScore};
pub use import::{load_ledger, parse_expenses_csv, parse_incomes_csv, read_ledger_json};
pub use insights::{
    money, AnalysisContext, Insight, InsightEngine, InsightKind, InsightRule, Severity,
};
pub use models::{
    Budget, Category, Expense, Goal, GoalStatus, Income, IncomeSource, Ledger, Reminder,
};
pub use oracle::{Oracle, OracleReport, SnapshotSummary};
pub use snapshot::{CategoryTotal, DataAvailability, FinancialSnapshot, YearMonth};
pub use trend::{
    analyze_trend, snapshot_trend, spending_velocity, SpendingTrend, SpendingVelocity,
    TrendDirection,
};
