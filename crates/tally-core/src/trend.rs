//! Month-over-month spending trend and spending velocity

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::TrendPolicy;
use crate::snapshot::FinancialSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Flat => "flat",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Flat => "→",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current month's spending compared with the previous month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpendingTrend {
    pub direction: TrendDirection,
    /// Rounded percent change. Only meaningful when [`has_baseline`] is true.
    ///
    /// [`has_baseline`]: SpendingTrend::has_baseline
    pub change_percent: i64,
    pub current_total: Decimal,
    pub previous_total: Decimal,
}

impl SpendingTrend {
    /// Whether there was previous-month spending to compare against.
    ///
    /// Callers must check this before reading `change_percent`.
    pub fn has_baseline(&self) -> bool {
        self.previous_total > Decimal::ZERO
    }
}

/// Compare two monthly totals
///
/// With no previous spending the percentage has nothing to be relative to,
/// so the trend is reported as flat with a zero change.
pub fn analyze_trend(current: Decimal, previous: Decimal, policy: &TrendPolicy) -> SpendingTrend {
    if previous <= Decimal::ZERO {
        return SpendingTrend {
            direction: TrendDirection::Flat,
            change_percent: 0,
            current_total: current,
            previous_total: previous,
        };
    }

    let change_percent = match current
        .checked_sub(previous)
        .and_then(|diff| diff.checked_div(previous))
        .and_then(|r| r.checked_mul(Decimal::from(100)))
    {
        Some(percent) => round_half_up(percent),
        // Change too large to represent: saturate in its direction
        None if current >= previous => i64::MAX,
        None => i64::MIN,
    };

    let direction = if change_percent.unsigned_abs() <= policy.flat_tolerance_percent.unsigned_abs() {
        TrendDirection::Flat
    } else if change_percent > 0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    SpendingTrend {
        direction,
        change_percent,
        current_total: current,
        previous_total: previous,
    }
}

/// Trend of the snapshot's current month against the previous one
pub fn snapshot_trend(snapshot: &FinancialSnapshot, policy: &TrendPolicy) -> SpendingTrend {
    analyze_trend(
        snapshot.current_expense_total(),
        snapshot.previous_expense_total(),
        policy,
    )
}

/// Rounds halves toward positive infinity (2.5 -> 3, -2.5 -> -2)
fn round_half_up(value: Decimal) -> i64 {
    value
        .checked_add(Decimal::new(5, 1))
        .and_then(|v| v.floor().to_i64())
        .unwrap_or(if value.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// How fast money is leaving this month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpendingVelocity {
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub daily_average: Decimal,
    /// Month-end total if the daily average holds
    pub projected_total: Decimal,
}

/// Project the current month's spending to month end
pub fn spending_velocity(snapshot: &FinancialSnapshot) -> SpendingVelocity {
    let days_elapsed = snapshot.today.day();
    let days_in_month = days_in_month(snapshot.today);
    let spent = snapshot.current_expense_total();

    let elapsed = Decimal::from(days_elapsed);
    let month = Decimal::from(days_in_month);

    let daily_average = (spent / elapsed).round_dp(2);
    let projected_total = spent
        .checked_mul(month)
        .and_then(|v| v.checked_div(elapsed))
        .unwrap_or_else(|| (spent / elapsed).saturating_mul(month))
        .round_dp(2);

    SpendingVelocity {
        days_elapsed,
        days_in_month,
        daily_average,
        projected_total,
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}
