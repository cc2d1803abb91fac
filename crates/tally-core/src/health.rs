//! Financial health score
//!
//! A single 0-100 figure built from three components, each normalised to
//! [0, 1] before weighting:
//!
//! - **savings**: savings rate relative to the target rate
//! - **spending**: expense/income ratio between the target and the maximum
//! - **goals**: mean progress of goals that are not cancelled
//!
//! Components without data are left out and the remaining weights are
//! renormalised, so a user with no goals is not penalised for it.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::HealthPolicy;
use crate::models::{ratio, GoalStatus};
use crate::snapshot::FinancialSnapshot;

/// Lower bound (inclusive) of each grade
pub const EXCELLENT_THRESHOLD: u8 = 80;
pub const GOOD_THRESHOLD: u8 = 60;
pub const FAIR_THRESHOLD: u8 = 40;

/// Letter grade derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Grade::Excellent
        } else if score >= GOOD_THRESHOLD {
            Grade::Good
        } else if score >= FAIR_THRESHOLD {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Fair => "fair",
            Grade::Poor => "poor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalised component values, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HealthBreakdown {
    pub savings: f64,
    pub spending: f64,
    /// None when there are no goals to score
    pub goals: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthScore {
    pub score: u8,
    pub grade: Grade,
    /// (income - expenses) / income for the current month; None without income
    pub savings_rate: Option<f64>,
    pub breakdown: HealthBreakdown,
}

impl HealthScore {
    fn from_raw(raw: f64, savings_rate: Option<f64>, breakdown: HealthBreakdown) -> Self {
        let score = if raw.is_finite() {
            raw.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Self {
            score,
            grade: Grade::from_score(score),
            savings_rate,
            breakdown,
        }
    }
}

/// Score the current month of a snapshot
pub fn score_health(snapshot: &FinancialSnapshot, policy: &HealthPolicy) -> HealthScore {
    let income = snapshot.current_income_total();
    let expenses = snapshot.current_expense_total();
    let goals = goal_component(snapshot);

    if income <= Decimal::ZERO {
        if expenses > Decimal::ZERO {
            // Spending with nothing coming in
            return HealthScore::from_raw(
                0.0,
                None,
                HealthBreakdown {
                    goals,
                    ..Default::default()
                },
            );
        }

        let breakdown = HealthBreakdown {
            goals,
            ..Default::default()
        };
        let raw = match goals {
            Some(g) if policy.goals_weight > 0.0 => g * 100.0,
            _ => 0.0,
        };
        return HealthScore::from_raw(raw, None, breakdown);
    }

    let savings_rate = ratio(income.saturating_sub(expenses), income);
    let expense_ratio = ratio(expenses, income);

    let savings = (savings_rate / policy.target_savings_rate).clamp(0.0, 1.0);
    let spending = ((policy.max_expense_ratio - expense_ratio)
        / (policy.max_expense_ratio - policy.target_expense_ratio))
        .clamp(0.0, 1.0);

    let mut weighted = policy.savings_weight * savings + policy.spending_weight * spending;
    let mut total_weight = policy.savings_weight + policy.spending_weight;
    if let Some(g) = goals {
        weighted += policy.goals_weight * g;
        total_weight += policy.goals_weight;
    }

    let raw = if total_weight > 0.0 {
        weighted / total_weight * 100.0
    } else {
        0.0
    };

    HealthScore::from_raw(
        raw,
        Some(savings_rate),
        HealthBreakdown {
            savings,
            spending,
            goals,
        },
    )
}

/// Mean clamped progress across goals that are not cancelled
fn goal_component(snapshot: &FinancialSnapshot) -> Option<f64> {
    let progress: Vec<f64> = snapshot
        .goals
        .iter()
        .filter(|g| g.status != GoalStatus::Cancelled)
        .map(|g| {
            if g.is_completed() {
                1.0
            } else {
                g.progress_fraction().clamp(0.0, 1.0)
            }
        })
        .collect();

    if progress.is_empty() {
        None
    } else {
        Some(progress.iter().sum::<f64>() / progress.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Ledger};
    use crate::test_utils::{date, expense, goal, income};

    fn today() -> chrono::NaiveDate {
        date(2024, 3, 20)
    }

    fn month_ledger(income_amount: i64, expense_amount: i64) -> Ledger {
        let mut ledger = Ledger::default();
        if income_amount > 0 {
            ledger.incomes.push(income(income_amount, date(2024, 3, 1)));
        }
        if expense_amount > 0 {
            ledger
                .expenses
                .push(expense(expense_amount, date(2024, 3, 5), Category::Food));
        }
        ledger
    }

    fn score(ledger: &Ledger) -> HealthScore {
        let snapshot = FinancialSnapshot::build(ledger, today());
        score_health(&snapshot, &HealthPolicy::default())
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(80), Grade::Excellent);
        assert_eq!(Grade::from_score(79), Grade::Good);
        assert_eq!(Grade::from_score(60), Grade::Good);
        assert_eq!(Grade::from_score(59), Grade::Fair);
        assert_eq!(Grade::from_score(40), Grade::Fair);
        assert_eq!(Grade::from_score(39), Grade::Poor);
        assert_eq!(Grade::from_score(0), Grade::Poor);
    }

    #[test]
    fn test_zero_income_with_expenses_scores_zero() {
        for spent in [1, 50, 10_000] {
            let health = score(&month_ledger(0, spent));
            assert_eq!(health.score, 0);
            assert_eq!(health.grade, Grade::Poor);
            assert_eq!(health.savings_rate, None);
        }
    }

    #[test]
    fn test_zero_income_with_expenses_ignores_goals() {
        let mut ledger = month_ledger(0, 100);
        ledger
            .goals
            .push(goal("Done", 100, 100, date(2024, 1, 1), None));
        assert_eq!(score(&ledger).score, 0);
    }

    #[test]
    fn test_no_data_scores_zero() {
        let health = score(&Ledger::default());
        assert_eq!(health.score, 0);
        assert_eq!(health.breakdown.goals, None);
    }

    #[test]
    fn test_goals_only() {
        let mut ledger = Ledger::default();
        ledger
            .goals
            .push(goal("Half", 1000, 500, date(2024, 1, 1), None));
        let health = score(&ledger);
        assert_eq!(health.score, 50);
        assert_eq!(health.breakdown.goals, Some(0.5));
    }

    #[test]
    fn test_perfect_month_without_goals() {
        // 50% savings rate: both components saturate, goals are left out
        let health = score(&month_ledger(4000, 2000));
        assert_eq!(health.score, 100);
        assert_eq!(health.grade, Grade::Excellent);
        assert_eq!(health.savings_rate, Some(0.5));
    }

    #[test]
    fn test_spending_everything() {
        // ratio 1.0 sits halfway between 0.8 and 1.2 => spending 0.5, savings 0
        let health = score(&month_ledger(1000, 1000));
        assert_eq!(health.breakdown.savings, 0.0);
        assert!((health.breakdown.spending - 0.5).abs() < 1e-9);
        // 30 * 0.5 / 70 * 100 = 21.4
        assert_eq!(health.score, 21);
        assert_eq!(health.grade, Grade::Poor);
    }

    #[test]
    fn test_heavy_overspending_clamps_at_zero() {
        let health = score(&month_ledger(1000, 5000));
        assert_eq!(health.score, 0);
        assert_eq!(health.savings_rate, Some(-4.0));
    }

    #[test]
    fn test_goal_component_uses_weights() {
        let mut ledger = month_ledger(4000, 2000);
        ledger
            .goals
            .push(goal("Zero", 1000, 0, date(2024, 1, 1), None));
        // (40 + 30 + 0) / 100
        assert_eq!(score(&ledger).score, 70);
    }

    #[test]
    fn test_cancelled_goals_are_ignored() {
        let mut ledger = month_ledger(4000, 2000);
        let mut cancelled = goal("Old", 1000, 0, date(2024, 1, 1), None);
        cancelled.status = GoalStatus::Cancelled;
        ledger.goals.push(cancelled);

        let health = score(&ledger);
        assert_eq!(health.breakdown.goals, None);
        assert_eq!(health.score, 100);
    }

    #[test]
    fn test_score_bounded_and_monotonic_in_savings_rate() {
        let mut previous = 0u8;
        for spent in (0..=3000).rev().step_by(50) {
            let health = score(&month_ledger(2000, spent));
            assert!(health.score <= 100);
            assert_eq!(health.grade, Grade::from_score(health.score));
            assert!(
                health.score >= previous,
                "score dropped from {} to {} at spend {}",
                previous,
                health.score,
                spent
            );
            previous = health.score;
        }
    }
}
