//! Goal Pace Rule
//!
//! One warning per goal that has fallen behind its linear schedule.

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, weight_of, Insight, InsightKind, Severity};

pub struct GoalPaceRule;

impl InsightRule for GoalPaceRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Goal
    }

    fn name(&self) -> &'static str {
        "Goal Pace"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        ctx.goals
            .iter()
            .filter(|a| a.is_behind_schedule)
            .map(|a| {
                let elapsed_percent = a.elapsed_fraction.unwrap_or(0.0) * 100.0;
                let catch_up = match a.monthly_needed {
                    Some(monthly) => format!(" Save {} a month to finish on time.", money(monthly)),
                    None => " The target date has passed.".to_string(),
                };

                Insight::new(
                    InsightKind::Goal,
                    format!("goal:behind:{}:{}", a.goal.id, a.goal.name),
                    Severity::Warning,
                    format!("\"{}\" is behind schedule", a.goal.name),
                    format!(
                        "{}% saved with {:.0}% of the time gone ({} of {}).{}",
                        a.progress_percent,
                        elapsed_percent,
                        money(a.goal.current_amount),
                        money(a.goal.target_amount),
                        catch_up
                    ),
                    ctx.snapshot.today,
                )
                .with_weight(weight_of(elapsed_percent - f64::from(a.progress_percent)))
            })
            .collect()
    }
}
