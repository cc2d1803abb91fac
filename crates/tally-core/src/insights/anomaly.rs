//! Anomaly rules
//!
//! Conditions that usually mean money is leaving faster than planned:
//! spending above income, a category jumping against last month, and
//! category budgets running out.

use rust_decimal::Decimal;

use crate::models::ratio;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, weight_of, Insight, InsightKind, Severity};

/// Current-month expenses above current-month income
pub struct OverspendingRule;

impl InsightRule for OverspendingRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Anomaly
    }

    fn name(&self) -> &'static str {
        "Overspending"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let snapshot = ctx.snapshot;
        let income = snapshot.current_income_total();
        let spent = snapshot.current_expense_total();

        // Zero income is the health rule's business
        if income <= Decimal::ZERO || spent <= income {
            return vec![];
        }

        let over = spent.saturating_sub(income);
        let over_percent = ratio(over, income) * 100.0;
        let relevant_on = snapshot
            .current_expenses
            .iter()
            .map(|e| e.date)
            .max()
            .unwrap_or(snapshot.today);

        vec![Insight::new(
            InsightKind::Anomaly,
            "anomaly:overspending",
            Severity::Alert,
            "Spending exceeds income",
            format!(
                "You've spent {} this month against {} of income, {} more than you earned.",
                money(spent),
                money(income),
                money(over)
            ),
            relevant_on,
        )
        .with_weight(weight_of(over_percent))]
    }
}

/// A category that grew sharply compared with the previous month
pub struct CategorySpikeRule;

impl InsightRule for CategorySpikeRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Anomaly
    }

    fn name(&self) -> &'static str {
        "Category Spike"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let policy = &ctx.policy.insights;
        let previous = ctx.snapshot.previous_by_category();
        let mut insights = vec![];

        for (category, current) in ctx.snapshot.current_by_category() {
            // New categories have no baseline to spike from
            let Some(before) = previous.get(&category) else {
                continue;
            };
            if before.amount <= Decimal::ZERO {
                continue;
            }

            let increase = current.amount.saturating_sub(before.amount);
            let percent = ratio(increase, before.amount) * 100.0;
            if percent < policy.spike_percent || increase < policy.spike_min_amount {
                continue;
            }

            insights.push(
                Insight::new(
                    InsightKind::Anomaly,
                    format!("anomaly:spike:{}", category.as_str()),
                    Severity::Warning,
                    format!("{} spending jumped", category.label()),
                    format!(
                        "{} {}: {} this month vs {} last month (+{:.0}%).",
                        category.icon(),
                        category.label(),
                        money(current.amount),
                        money(before.amount),
                        percent
                    ),
                    current.last_date,
                )
                .with_weight(weight_of(percent)),
            );
        }

        insights
    }
}

/// Category budgets that are exhausted or close to it
pub struct BudgetAlertRule;

impl InsightRule for BudgetAlertRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Anomaly
    }

    fn name(&self) -> &'static str {
        "Budget Alert"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let snapshot = ctx.snapshot;
        let warning_ratio = ctx.policy.insights.budget_warning_ratio;
        let spending = snapshot.current_by_category();
        let mut insights = vec![];

        for budget in &snapshot.budgets {
            if budget.monthly_limit <= Decimal::ZERO {
                continue;
            }
            let Some(total) = spending.get(&budget.category) else {
                continue;
            };

            let used = ratio(total.amount, budget.monthly_limit);
            let label = budget.category.label();
            let key = format!("anomaly:budget:{}", budget.category.as_str());

            let insight = if used >= 1.0 {
                Insight::new(
                    InsightKind::Anomaly,
                    key,
                    Severity::Alert,
                    format!("Over budget: {}", label),
                    format!(
                        "{} has used {} of its {} budget ({:.0}%).",
                        label,
                        money(total.amount),
                        money(budget.monthly_limit),
                        used * 100.0
                    ),
                    total.last_date,
                )
            } else if used >= warning_ratio {
                Insight::new(
                    InsightKind::Anomaly,
                    key,
                    Severity::Attention,
                    format!("Approaching budget: {}", label),
                    format!(
                        "{} is at {:.0}% of its {} budget with {} left.",
                        label,
                        used * 100.0,
                        money(budget.monthly_limit),
                        money(budget.monthly_limit.saturating_sub(total.amount))
                    ),
                    total.last_date,
                )
            } else {
                continue;
            };

            insights.push(insight.with_weight(weight_of(used * 100.0)));
        }

        insights
    }
}
