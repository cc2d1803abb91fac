//! Trend Watch Rule
//!
//! Reports month-over-month movement in total spending. Needs previous-month
//! spending to compare against; without it the percentage means nothing and
//! the rule stays quiet.

use crate::trend::{spending_velocity, TrendDirection};

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, Insight, InsightKind, Severity};

pub struct TrendRule;

impl InsightRule for TrendRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Trend
    }

    fn name(&self) -> &'static str {
        "Trend Watch"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let trend = ctx.trend;
        if !trend.has_baseline() {
            return vec![];
        }

        let change = trend.change_percent;
        let weight = u32::try_from(change.unsigned_abs()).unwrap_or(u32::MAX);

        let insight = match trend.direction {
            TrendDirection::Flat => return vec![],
            TrendDirection::Up => {
                let severity = if change >= ctx.policy.trend.sharp_increase_percent {
                    Severity::Warning
                } else {
                    Severity::Attention
                };
                let velocity = spending_velocity(ctx.snapshot);
                Insight::new(
                    InsightKind::Trend,
                    "trend:spending",
                    severity,
                    format!("Spending up {}%", change),
                    format!(
                        "{} {} this month vs {} last month. At this pace you'll reach {} by month end.",
                        trend.direction.arrow(),
                        money(trend.current_total),
                        money(trend.previous_total),
                        money(velocity.projected_total)
                    ),
                    ctx.snapshot.today,
                )
            }
            TrendDirection::Down => Insight::new(
                InsightKind::Trend,
                "trend:spending",
                Severity::Info,
                format!("Spending down {}%", change.unsigned_abs()),
                format!(
                    "{} {} this month vs {} last month. Nice work keeping costs down.",
                    trend.direction.arrow(),
                    money(trend.current_total),
                    money(trend.previous_total)
                ),
                ctx.snapshot.today,
            ),
        };

        vec![insight.with_weight(weight)]
    }
}
