//! Core types for the Insight Engine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something unusual: overspending, a category spike, a blown budget
    Anomaly,
    /// Overall financial health
    Health,
    /// Month-over-month spending movement
    Trend,
    /// Neutral overview when nothing else applies
    Summary,
    /// Savings goal pace
    Goal,
    /// Actionable suggestion
    Tip,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Anomaly => "anomaly",
            InsightKind::Health => "health",
            InsightKind::Trend => "trend",
            InsightKind::Summary => "summary",
            InsightKind::Goal => "goal",
            InsightKind::Tip => "tip",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            InsightKind::Anomaly => "⚠",
            InsightKind::Health => "❤",
            InsightKind::Trend => "📈",
            InsightKind::Summary => "✨",
            InsightKind::Goal => "🎯",
            InsightKind::Tip => "💡",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
            Severity::Alert => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ranked, human-readable observation derived from a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Stable identity for deduplication (e.g., "anomaly:budget:food")
    pub key: String,
    pub severity: Severity,
    /// Short title (e.g., "Over budget: Shopping")
    pub title: String,
    /// One or two sentences of explanation
    pub content: String,
    /// Tie-breaker within a severity and date; larger ranks first
    pub weight: u32,
    /// The latest date the insight is about
    pub relevant_on: NaiveDate,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        key: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        content: impl Into<String>,
        relevant_on: NaiveDate,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            severity,
            title: title.into(),
            content: content.into(),
            weight: 0,
            relevant_on,
        }
    }

    /// Set the ranking weight
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// Format an amount with two decimals and a leading sign
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// Clamp a float into a ranking weight
pub(crate) fn weight_of(value: f64) -> u32 {
    if value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_kind_serialization() {
        assert_eq!(InsightKind::Anomaly.as_str(), "anomaly");
        assert_eq!(InsightKind::Tip.to_string(), "tip");
        assert_eq!(
            serde_json::to_string(&InsightKind::Summary).unwrap(),
            "\"summary\""
        );
    }

    #[test]
    fn test_severity_priority() {
        assert!(Severity::Alert.priority() > Severity::Warning.priority());
        assert!(Severity::Warning.priority() > Severity::Attention.priority());
        assert!(Severity::Attention.priority() > Severity::Info.priority());
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_insight_builder() {
        let insight = Insight::new(
            InsightKind::Tip,
            "tip:test",
            Severity::Info,
            "Test Title",
            "Test content",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .with_weight(42);

        assert_eq!(insight.key, "tip:test");
        assert_eq!(insight.weight, 42);
    }

    #[test]
    fn test_money_format() {
        assert_eq!(money(Decimal::new(123456, 2)), "$1234.56");
        assert_eq!(money(Decimal::from(5)), "$5.00");
        assert_eq!(money(Decimal::new(-2505, 2)), "-$25.05");
    }

    #[test]
    fn test_weight_of() {
        assert_eq!(weight_of(12.4), 12);
        assert_eq!(weight_of(-3.0), 0);
        assert_eq!(weight_of(f64::NAN), 0);
        assert_eq!(weight_of(f64::INFINITY), u32::MAX);
    }
}
