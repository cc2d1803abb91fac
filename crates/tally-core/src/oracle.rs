//! The Oracle - full analysis pipeline
//!
//! ledger -> snapshot -> {health, trend, goals} -> insights
//!
//! Nothing is cached between calls. Every analysis rebuilds the snapshot,
//! so two calls over the same ledger and date return equal reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::clock::Clock;
use crate::config::Policy;
use crate::goals::{analyze_goals, GoalAnalysis};
use crate::health::{score_health, HealthScore};
use crate::insights::{AnalysisContext, Insight, InsightEngine};
use crate::models::Ledger;
use crate::snapshot::{DataAvailability, FinancialSnapshot, YearMonth};
use crate::trend::{snapshot_trend, spending_velocity, SpendingTrend, SpendingVelocity};

/// Headline figures of the snapshot an analysis ran on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub today: NaiveDate,
    pub month: YearMonth,
    pub previous_month: YearMonth,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub previous_income_total: Decimal,
    pub previous_expense_total: Decimal,
    pub availability: DataAvailability,
}

impl SnapshotSummary {
    fn of(snapshot: &FinancialSnapshot) -> Self {
        Self {
            today: snapshot.today,
            month: snapshot.current_month,
            previous_month: snapshot.previous_month,
            income_total: snapshot.current_income_total(),
            expense_total: snapshot.current_expense_total(),
            previous_income_total: snapshot.previous_income_total(),
            previous_expense_total: snapshot.previous_expense_total(),
            availability: snapshot.availability,
        }
    }

    /// Current month income minus expenses
    pub fn net(&self) -> Decimal {
        self.income_total.saturating_sub(self.expense_total)
    }
}

/// Everything the dashboard shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleReport {
    pub summary: SnapshotSummary,
    pub health: HealthScore,
    pub trend: SpendingTrend,
    pub velocity: SpendingVelocity,
    pub goals: Vec<GoalAnalysis>,
    pub insights: Vec<Insight>,
}

/// Runs the analysis pipeline with a fixed policy and rule set
pub struct Oracle {
    policy: Policy,
    engine: InsightEngine,
}

impl Default for Oracle {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Oracle {
    /// Create an oracle with the built-in rules
    pub fn new(policy: Policy) -> Self {
        Self::with_engine(policy, InsightEngine::new())
    }

    /// Create an oracle with a custom rule set
    pub fn with_engine(policy: Policy, engine: InsightEngine) -> Self {
        Self { policy, engine }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn engine(&self) -> &InsightEngine {
        &self.engine
    }

    /// Analyze a ledger as of `today`
    pub fn analyze(&self, ledger: &Ledger, today: NaiveDate) -> OracleReport {
        let snapshot = FinancialSnapshot::build(ledger, today);
        self.analyze_snapshot(&snapshot)
    }

    /// Analyze a ledger as of the clock's current date
    pub fn analyze_now(&self, ledger: &Ledger, clock: &dyn Clock) -> OracleReport {
        self.analyze(ledger, clock.today())
    }

    /// Analyze an already-built snapshot
    pub fn analyze_snapshot(&self, snapshot: &FinancialSnapshot) -> OracleReport {
        let health = score_health(snapshot, &self.policy.health);
        let trend = snapshot_trend(snapshot, &self.policy.trend);
        let velocity = spending_velocity(snapshot);
        let goals = analyze_goals(&snapshot.goals, snapshot.today, &self.policy.goals);

        let insights = self.engine.generate(&AnalysisContext {
            snapshot,
            health: &health,
            trend: &trend,
            goals: &goals,
            policy: &self.policy,
        });

        tracing::debug!(
            score = health.score,
            grade = health.grade.as_str(),
            trend = trend.direction.as_str(),
            goals = goals.len(),
            insights = insights.len(),
            "Analysis complete"
        );

        OracleReport {
            summary: SnapshotSummary::of(snapshot),
            health,
            trend,
            velocity,
            goals,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::health::Grade;
    use crate::insights::InsightKind;
    use crate::models::Category;
    use crate::test_utils::{date, expense, fixture_today, income, quiet_ledger, stressed_ledger};

    #[test]
    fn test_empty_ledger_report() {
        let report = Oracle::default().analyze(&Ledger::default(), fixture_today());

        assert!(report.insights.is_empty());
        assert!(report.goals.is_empty());
        assert_eq!(report.health.score, 0);
        assert_eq!(report.summary.availability, DataAvailability::default());
        assert!(!report.trend.has_baseline());
    }

    #[test]
    fn test_quiet_ledger_report() {
        let report = Oracle::default().analyze(&quiet_ledger(), fixture_today());

        assert_eq!(report.health.grade, Grade::Excellent);
        assert_eq!(report.summary.net(), Decimal::from(2890));
        assert_eq!(report.goals.len(), 1);
        assert!(!report.goals[0].is_behind_schedule);
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].kind, InsightKind::Summary);
    }

    #[test]
    fn test_analyze_now_uses_clock() {
        let oracle = Oracle::default();
        let ledger = stressed_ledger();
        let via_clock = oracle.analyze_now(&ledger, &FixedClock(fixture_today()));
        assert_eq!(via_clock, oracle.analyze(&ledger, fixture_today()));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let oracle = Oracle::default();
        let ledger = stressed_ledger();
        let first = oracle.analyze(&ledger, fixture_today());
        let second = oracle.analyze(&ledger, fixture_today());
        assert_eq!(first, second);
        assert_eq!(ledger, stressed_ledger());
    }

    #[test]
    fn test_extreme_amounts_do_not_panic() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let mut small_income = income(0, date(2024, 3, 1));
        small_income.amount = Decimal::new(1, 2);
        let mut big_expense = expense(0, date(2024, 3, 5), Category::Shopping);
        big_expense.amount = huge;
        let mut small_previous = expense(0, date(2024, 2, 5), Category::Shopping);
        small_previous.amount = Decimal::new(1, 2);

        let ledger = Ledger {
            incomes: vec![small_income],
            expenses: vec![big_expense.clone(), big_expense, small_previous],
            ..Default::default()
        };

        let report = Oracle::default().analyze(&ledger, fixture_today());
        assert_eq!(report.health.score, 0);
        assert_eq!(report.trend.change_percent, i64::MAX);
        assert_eq!(report.insights[0].key, "anomaly:overspending");
        assert!(report.insights.len() <= 3);
    }
}
