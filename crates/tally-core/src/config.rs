//! Insight policy configuration
//!
//! Every threshold the engine uses lives in [`Policy`]. Config is loaded with
//! a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/policy.toml)
//! 2. The embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default policy (compiled into binary)
const DEFAULT_POLICY: &str = include_str!("../../../config/policy.toml");

const KNOWN_SECTIONS: &[&str] = &["health", "trend", "goals", "insights"];

/// Weights and targets for the health score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthPolicy {
    pub savings_weight: f64,
    pub spending_weight: f64,
    pub goals_weight: f64,
    /// Savings rate that earns the full savings component
    pub target_savings_rate: f64,
    /// Expense ratio at or below which spending scores in full
    pub target_expense_ratio: f64,
    /// Expense ratio at which spending scores zero
    pub max_expense_ratio: f64,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            savings_weight: 40.0,
            spending_weight: 30.0,
            goals_weight: 30.0,
            target_savings_rate: 0.20,
            target_expense_ratio: 0.80,
            max_expense_ratio: 1.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPolicy {
    /// Half-width of the band around zero reported as flat
    pub flat_tolerance_percent: i64,
    /// Increases at or above this are warnings rather than attention items
    pub sharp_increase_percent: i64,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            flat_tolerance_percent: 5,
            sharp_increase_percent: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalPolicy {
    /// Goals are not judged before this share of their schedule has elapsed
    pub min_elapsed_fraction: f64,
    /// Behind schedule when progress < elapsed * pace_factor
    pub pace_factor: f64,
}

impl Default for GoalPolicy {
    fn default() -> Self {
        Self {
            min_elapsed_fraction: 0.2,
            pace_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightPolicy {
    pub max_insights: usize,
    pub spike_percent: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub spike_min_amount: Decimal,
    pub budget_warning_ratio: f64,
    pub reminder_window_days: i64,
}

impl Default for InsightPolicy {
    fn default() -> Self {
        Self {
            max_insights: 3,
            spike_percent: 50.0,
            spike_min_amount: Decimal::from(50),
            budget_warning_ratio: 0.8,
            reminder_window_days: 7,
        }
    }
}

/// All tunable thresholds used by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Policy {
    pub health: HealthPolicy,
    pub trend: TrendPolicy,
    pub goals: GoalPolicy,
    pub insights: InsightPolicy,
}

impl Policy {
    /// Load the effective policy (explicit path, then data-dir override, then defaults)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Policy file not found: {}",
                        path.display()
                    )));
                }
                tracing::debug!(path = %path.display(), "Loading policy override");
                fs::read_to_string(path)?
            }
            None => match default_policy_path() {
                Some(default_path) if default_path.exists() => {
                    tracing::debug!(path = %default_path.display(), "Loading policy override");
                    fs::read_to_string(&default_path)?
                }
                _ => DEFAULT_POLICY.to_string(),
            },
        };

        parse_policy(&content)
    }

    /// Reject combinations the scorers cannot work with
    pub fn validate(&self) -> Result<()> {
        let h = &self.health;
        for (name, weight) in [
            ("health.savings_weight", h.savings_weight),
            ("health.spending_weight", h.spending_weight),
            ("health.goals_weight", h.goals_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(format!("{} must be a non-negative number", name)));
            }
        }
        if h.savings_weight + h.spending_weight + h.goals_weight <= 0.0 {
            return Err(invalid("health weights must not all be zero"));
        }
        if !(h.target_savings_rate > 0.0 && h.target_savings_rate <= 1.0) {
            return Err(invalid("health.target_savings_rate must be in (0, 1]"));
        }
        if !(h.target_expense_ratio >= 0.0 && h.target_expense_ratio < h.max_expense_ratio) {
            return Err(invalid(
                "health.target_expense_ratio must be below health.max_expense_ratio",
            ));
        }

        let t = &self.trend;
        if t.flat_tolerance_percent < 0 {
            return Err(invalid("trend.flat_tolerance_percent must not be negative"));
        }
        if t.sharp_increase_percent <= t.flat_tolerance_percent {
            return Err(invalid(
                "trend.sharp_increase_percent must exceed trend.flat_tolerance_percent",
            ));
        }

        let g = &self.goals;
        if !(0.0..1.0).contains(&g.min_elapsed_fraction) {
            return Err(invalid("goals.min_elapsed_fraction must be in [0, 1)"));
        }
        if !(g.pace_factor > 0.0 && g.pace_factor <= 1.0) {
            return Err(invalid("goals.pace_factor must be in (0, 1]"));
        }

        let i = &self.insights;
        if i.max_insights == 0 {
            return Err(invalid("insights.max_insights must be at least 1"));
        }
        if !(i.spike_percent > 0.0) {
            return Err(invalid("insights.spike_percent must be positive"));
        }
        if i.spike_min_amount < Decimal::ZERO {
            return Err(invalid("insights.spike_min_amount must not be negative"));
        }
        if !(i.budget_warning_ratio > 0.0 && i.budget_warning_ratio <= 1.0) {
            return Err(invalid("insights.budget_warning_ratio must be in (0, 1]"));
        }
        if i.reminder_window_days < 0 {
            return Err(invalid("insights.reminder_window_days must not be negative"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::Config(msg.into())
}

/// Default policy override path
pub fn default_policy_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("policy.toml"))
}

/// Raw policy structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawPolicy {
    health: Option<RawHealth>,
    trend: Option<RawTrend>,
    goals: Option<RawGoals>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    savings_weight: Option<f64>,
    spending_weight: Option<f64>,
    goals_weight: Option<f64>,
    target_savings_rate: Option<f64>,
    target_expense_ratio: Option<f64>,
    max_expense_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    flat_tolerance_percent: Option<i64>,
    sharp_increase_percent: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    min_elapsed_fraction: Option<f64>,
    pace_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    max_insights: Option<usize>,
    spike_percent: Option<f64>,
    spike_min_amount: Option<f64>,
    budget_warning_ratio: Option<f64>,
    reminder_window_days: Option<i64>,
}

/// Parse and validate a policy from TOML content
pub fn parse_policy(content: &str) -> Result<Policy> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid policy TOML: {}", e)))?;

    for section in table.keys() {
        if !KNOWN_SECTIONS.contains(&section.as_str()) {
            tracing::warn!(section = %section, "Ignoring unknown policy section");
        }
    }

    let raw: RawPolicy = toml::Value::Table(table)
        .try_into()
        .map_err(|e| Error::Config(format!("Invalid policy TOML: {}", e)))?;

    let mut policy = Policy::default();

    if let Some(health) = raw.health {
        let h = &mut policy.health;
        if let Some(v) = health.savings_weight {
            h.savings_weight = v;
        }
        if let Some(v) = health.spending_weight {
            h.spending_weight = v;
        }
        if let Some(v) = health.goals_weight {
            h.goals_weight = v;
        }
        if let Some(v) = health.target_savings_rate {
            h.target_savings_rate = v;
        }
        if let Some(v) = health.target_expense_ratio {
            h.target_expense_ratio = v;
        }
        if let Some(v) = health.max_expense_ratio {
            h.max_expense_ratio = v;
        }
    }

    if let Some(trend) = raw.trend {
        if let Some(v) = trend.flat_tolerance_percent {
            policy.trend.flat_tolerance_percent = v;
        }
        if let Some(v) = trend.sharp_increase_percent {
            policy.trend.sharp_increase_percent = v;
        }
    }

    if let Some(goals) = raw.goals {
        if let Some(v) = goals.min_elapsed_fraction {
            policy.goals.min_elapsed_fraction = v;
        }
        if let Some(v) = goals.pace_factor {
            policy.goals.pace_factor = v;
        }
    }

    if let Some(insights) = raw.insights {
        let i = &mut policy.insights;
        if let Some(v) = insights.max_insights {
            i.max_insights = v;
        }
        if let Some(v) = insights.spike_percent {
            i.spike_percent = v;
        }
        if let Some(v) = insights.spike_min_amount {
            i.spike_min_amount = Decimal::from_f64(v).ok_or_else(|| {
                Error::Config(format!("insights.spike_min_amount is not a number: {}", v))
            })?;
        }
        if let Some(v) = insights.budget_warning_ratio {
            i.budget_warning_ratio = v;
        }
        if let Some(v) = insights.reminder_window_days {
            i.reminder_window_days = v;
        }
    }

    policy.validate()?;
    Ok(policy)
}
