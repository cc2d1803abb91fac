//! Goal pace analysis
//!
//! A goal with a target date is expected to fill up linearly between its
//! creation date and its target date. It is behind schedule once enough of
//! that window has passed and its actual progress trails the expected
//! progress by more than the policy's pace factor allows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::GoalPolicy;
use crate::models::{Goal, GoalStatus};

/// Average month length used to turn days into a monthly contribution
const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAnalysis {
    pub goal: Goal,
    /// Rounded progress, capped at 100 for display
    pub progress_percent: u8,
    pub is_completed: bool,
    pub is_behind_schedule: bool,
    /// Share of the schedule already elapsed; None without a target date
    pub elapsed_fraction: Option<f64>,
    /// Days until the target date (negative once it has passed)
    pub days_remaining: Option<i64>,
    /// Contribution per month needed to finish on time
    pub monthly_needed: Option<Decimal>,
}

/// Analyze every goal that has not been cancelled, in input order
pub fn analyze_goals(goals: &[Goal], today: NaiveDate, policy: &GoalPolicy) -> Vec<GoalAnalysis> {
    goals
        .iter()
        .filter(|g| g.status != GoalStatus::Cancelled)
        .map(|g| analyze_goal(g, today, policy))
        .collect()
}

/// Analyze a single goal
pub fn analyze_goal(goal: &Goal, today: NaiveDate, policy: &GoalPolicy) -> GoalAnalysis {
    let progress = goal.progress_fraction();
    let progress_percent = (progress.clamp(0.0, 1.0) * 100.0).round() as u8;
    let is_completed = goal.is_completed();

    let elapsed_fraction = goal
        .target_date
        .map(|target| elapsed_fraction(goal.created_at, target, today));

    let is_behind_schedule = match elapsed_fraction {
        Some(elapsed) if !is_completed && goal.status == GoalStatus::Active => {
            elapsed > policy.min_elapsed_fraction && progress < elapsed * policy.pace_factor
        }
        _ => false,
    };

    let days_remaining = goal.target_date.map(|target| (target - today).num_days());

    let monthly_needed = match days_remaining {
        Some(days) if days > 0 && !is_completed => {
            let months = ((days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH).max(1);
            Some((goal.remaining() / Decimal::from(months)).round_dp(2))
        }
        _ => None,
    };

    GoalAnalysis {
        goal: goal.clone(),
        progress_percent,
        is_completed,
        is_behind_schedule,
        elapsed_fraction,
        days_remaining,
        monthly_needed,
    }
}

/// clamp((today - created) / (target - created), 0, 1)
///
/// A degenerate window (target on or before creation) counts as fully
/// elapsed once the target date is reached and not started before it.
fn elapsed_fraction(created: NaiveDate, target: NaiveDate, today: NaiveDate) -> f64 {
    let total = (target - created).num_days();
    if total <= 0 {
        return if today >= target { 1.0 } else { 0.0 };
    }
    let elapsed = (today - created).num_days();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}
