//! Health Check Rule
//!
//! Surfaces a low health score. Only months with recorded activity are
//! judged; a ledger holding nothing but older data would otherwise always
//! look unhealthy.

use crate::health::{FAIR_THRESHOLD, GOOD_THRESHOLD};

use super::engine::{AnalysisContext, InsightRule};
use super::types::{Insight, InsightKind, Severity};

pub struct HealthRule;

impl InsightRule for HealthRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Health
    }

    fn name(&self) -> &'static str {
        "Health Check"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let snapshot = ctx.snapshot;
        if snapshot.current_expenses.is_empty() && snapshot.current_incomes.is_empty() {
            return vec![];
        }

        let health = ctx.health;
        let (severity, title) = if health.score < FAIR_THRESHOLD {
            (Severity::Warning, "Financial health needs attention")
        } else if health.score < GOOD_THRESHOLD {
            (Severity::Attention, "Financial health is fair")
        } else {
            return vec![];
        };

        let content = match health.savings_rate {
            Some(rate) => format!(
                "Your health score is {}/100 ({}). You're saving {:.0}% of this month's income; aim for {:.0}% or more.",
                health.score,
                health.grade.label(),
                rate * 100.0,
                ctx.policy.health.target_savings_rate * 100.0
            ),
            None => format!(
                "Your health score is {}/100 ({}). No income is recorded this month to cover spending.",
                health.score,
                health.grade.label()
            ),
        };

        vec![Insight::new(
            InsightKind::Health,
            "health:score",
            severity,
            title,
            content,
            snapshot.today,
        )
        .with_weight(100 - u32::from(health.score))]
    }
}
