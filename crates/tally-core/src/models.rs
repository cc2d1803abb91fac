//! Domain models for Tally
//!
//! These are the read-only collections owned by the caller's store. The
//! engine never mutates them; every derived value is recomputed from a
//! [`Ledger`] on demand.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Education,
    Travel,
    Subscriptions,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Education => "education",
            Self::Travel => "travel",
            Self::Subscriptions => "subscriptions",
            Self::Other => "other",
        }
    }

    /// Human-readable label used in insight text
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Subscriptions => "Subscriptions",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Housing => "🏠",
            Self::Utilities => "💡",
            Self::Entertainment => "🎬",
            Self::Shopping => "🛍",
            Self::Health => "💊",
            Self::Education => "📚",
            Self::Travel => "✈",
            Self::Subscriptions => "🔁",
            Self::Other => "📦",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Housing,
            Self::Utilities,
            Self::Entertainment,
            Self::Shopping,
            Self::Health,
            Self::Education,
            Self::Travel,
            Self::Subscriptions,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" | "dining" | "groceries" => Ok(Self::Food),
            "transport" | "transportation" => Ok(Self::Transport),
            "housing" | "rent" => Ok(Self::Housing),
            "utilities" => Ok(Self::Utilities),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "health" | "healthcare" => Ok(Self::Health),
            "education" => Ok(Self::Education),
            "travel" => Ok(Self::Travel),
            "subscriptions" => Ok(Self::Subscriptions),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an income came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Salary,
    Freelance,
    Investment,
    Gift,
    #[default]
    Other,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Freelance => "freelance",
            Self::Investment => "investment",
            Self::Gift => "gift",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for IncomeSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salary" | "wages" => Ok(Self::Salary),
            "freelance" => Ok(Self::Freelance),
            "investment" | "investments" => Ok(Self::Investment),
            "gift" => Ok(Self::Gift),
            "other" | "" => Ok(Self::Other),
            _ => Err(format!("Unknown income source: {}", s)),
        }
    }
}

impl std::fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(default)]
    pub id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub source: IncomeSource,
    #[serde(default)]
    pub description: Option<String>,
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lifecycle of a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
}

impl Goal {
    /// Fraction of the target saved so far, unclamped.
    ///
    /// A non-positive target counts as fully funded.
    pub fn progress_fraction(&self) -> f64 {
        if self.target_amount <= Decimal::ZERO {
            return 1.0;
        }
        ratio(self.current_amount, self.target_amount)
    }

    /// Whether the saved amount has reached the target
    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Completed either explicitly or by reaching the target
    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed || self.is_funded()
    }

    /// Amount still missing, never negative
    pub fn remaining(&self) -> Decimal {
        self.target_amount
            .saturating_sub(self.current_amount)
            .max(Decimal::ZERO)
    }
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub monthly_limit: Decimal,
}

/// A bill reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

/// Everything the engine reads: the user's collections as held by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl Ledger {
    /// True when there is nothing to analyze at all
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty() && self.goals.is_empty()
    }

    /// Append another ledger's collections (used when merging CSV imports)
    pub fn merge(&mut self, other: Ledger) {
        self.incomes.extend(other.incomes);
        self.expenses.extend(other.expenses);
        self.goals.extend(other.goals);
        self.budgets.extend(other.budgets);
        self.reminders.extend(other.reminders);
    }
}

/// Lossy decimal to float conversion for ratios and scores
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `num / den` as a float. A zero denominator gives 0; a quotient beyond the
/// decimal range gives a signed `f64::MAX` for callers to clamp.
pub(crate) fn ratio(num: Decimal, den: Decimal) -> f64 {
    if den.is_zero() {
        return 0.0;
    }
    match num.checked_div(den) {
        Some(quotient) => to_f64(quotient),
        None if num.is_sign_negative() != den.is_sign_negative() => -f64::MAX,
        None => f64::MAX,
    }
}

/// Sum of amounts, saturating at the decimal range instead of panicking
pub(crate) fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn goal(target: i64, current: i64) -> Goal {
        Goal {
            id: 1,
            name: "Emergency fund".to_string(),
            target_amount: Decimal::from(target),
            current_amount: Decimal::from(current),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            target_date: None,
            status: GoalStatus::Active,
        }
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in Category::all() {
            assert_eq!(Category::from_str(category.as_str()).unwrap(), *category);
            assert!(!category.label().is_empty());
            assert!(!category.icon().is_empty());
        }
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!(Category::from_str("Groceries").unwrap(), Category::Food);
        assert_eq!(Category::from_str(" rent ").unwrap(), Category::Housing);
        assert!(Category::from_str("spaceships").is_err());
    }

    #[test]
    fn test_income_source_defaults_to_other() {
        assert_eq!(IncomeSource::default(), IncomeSource::Other);
        assert_eq!(IncomeSource::from_str("").unwrap(), IncomeSource::Other);
        assert_eq!(IncomeSource::from_str("Salary").unwrap(), IncomeSource::Salary);
    }

    #[test]
    fn test_goal_progress() {
        assert_eq!(goal(1000, 250).progress_fraction(), 0.25);
        assert_eq!(goal(1000, 1500).progress_fraction(), 1.5);
        assert_eq!(goal(0, 0).progress_fraction(), 1.0);
    }

    #[test]
    fn test_goal_completed_by_amount_or_status() {
        assert!(goal(1000, 1000).is_completed());
        assert!(!goal(1000, 999).is_completed());

        let mut g = goal(1000, 10);
        g.status = GoalStatus::Completed;
        assert!(g.is_completed());
    }

    #[test]
    fn test_goal_remaining_never_negative() {
        assert_eq!(goal(1000, 400).remaining(), Decimal::from(600));
        assert_eq!(goal(1000, 1400).remaining(), Decimal::ZERO);
    }

    #[test]
    fn test_ledger_deserialize_with_defaults() {
        let json = r#"{
            "expenses": [{"amount": "12.50", "date": "2024-03-02", "category": "food"}],
            "goals": [{"name": "Car", "target_amount": 5000, "created_at": "2024-01-01"}]
        }"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();

        assert!(ledger.incomes.is_empty());
        assert_eq!(ledger.expenses[0].amount, Decimal::new(1250, 2));
        assert_eq!(ledger.goals[0].status, GoalStatus::Active);
        assert_eq!(ledger.goals[0].current_amount, Decimal::ZERO);
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(Decimal::from(5), Decimal::ZERO), 0.0);
        assert_eq!(ratio(Decimal::from(1), Decimal::from(4)), 0.25);
    }

    #[test]
    fn test_ratio_beyond_decimal_range() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let cent = Decimal::new(1, 2);
        assert_eq!(ratio(huge, cent), f64::MAX);
        assert_eq!(ratio(-huge, cent), -f64::MAX);
        assert_eq!(ratio(huge, -cent), -f64::MAX);
    }

    #[test]
    fn test_total_saturates() {
        assert_eq!(total([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(total([Decimal::from(2), Decimal::from(3)]), Decimal::from(5));
        assert_eq!(total(Vec::new()), Decimal::ZERO);
    }
}
