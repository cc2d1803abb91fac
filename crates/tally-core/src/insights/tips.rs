//! Tip rules: savings suggestions and upcoming bills

use rust_decimal::Decimal;

use crate::models::ratio;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, weight_of, Insight, InsightKind, Severity};

/// Positive but below-target savings rate: point at the biggest category
pub struct SavingsTipRule;

impl InsightRule for SavingsTipRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Tip
    }

    fn name(&self) -> &'static str {
        "Savings Tip"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let Some(rate) = ctx.health.savings_rate else {
            return vec![];
        };
        let target = ctx.policy.health.target_savings_rate;
        // Negative rates are reported as overspending instead
        if !(0.0..target).contains(&rate) {
            return vec![];
        }

        let by_category = ctx.snapshot.current_by_category();
        let Some((category, top)) = by_category
            .iter()
            .max_by(|a, b| a.1.amount.cmp(&b.1.amount).then_with(|| b.0.cmp(a.0)))
        else {
            return vec![];
        };

        let spent = ctx.snapshot.current_expense_total();
        let share = ratio(top.amount, spent) * 100.0;

        vec![Insight::new(
            InsightKind::Tip,
            "tip:savings",
            Severity::Info,
            format!("Trim {} to save more", category.label()),
            format!(
                "You're saving {:.0}% of income. {} {} is your largest category at {} ({:.0}% of spending); cutting it by 10% frees up {}.",
                rate * 100.0,
                category.icon(),
                category.label(),
                money(top.amount),
                share,
                money(top.amount * Decimal::new(1, 1))
            ),
            top.last_date,
        )
        .with_weight(weight_of((target - rate) * 100.0))]
    }
}

/// Unpaid reminders that are overdue or due soon
pub struct UpcomingBillRule;

impl InsightRule for UpcomingBillRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Tip
    }

    fn name(&self) -> &'static str {
        "Upcoming Bills"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let today = ctx.snapshot.today;
        let window = ctx.policy.insights.reminder_window_days;

        ctx.snapshot
            .reminders
            .iter()
            .filter(|r| !r.paid)
            .filter_map(|r| {
                let days = (r.due_date - today).num_days();
                let key = format!("tip:reminder:{}:{}", r.id, r.title);

                if days < 0 {
                    let overdue = days.unsigned_abs();
                    Some(
                        Insight::new(
                            InsightKind::Tip,
                            key,
                            Severity::Warning,
                            format!("Overdue: {}", r.title),
                            format!(
                                "{} for {} was due {} day{} ago.",
                                r.title,
                                money(r.amount),
                                overdue,
                                if overdue == 1 { "" } else { "s" }
                            ),
                            r.due_date,
                        )
                        .with_weight(u32::try_from(overdue).unwrap_or(u32::MAX)),
                    )
                } else if days <= window {
                    let when = match days {
                        0 => "today".to_string(),
                        1 => "tomorrow".to_string(),
                        n => format!("in {} days", n),
                    };
                    Some(
                        Insight::new(
                            InsightKind::Tip,
                            key,
                            Severity::Attention,
                            format!("Bill due soon: {}", r.title),
                            format!("{} for {} is due {}.", r.title, money(r.amount), when),
                            r.due_date,
                        )
                        .with_weight(u32::try_from(window - days).unwrap_or(0)),
                    )
                } else {
                    None
                }
            })
            .collect()
    }
}
