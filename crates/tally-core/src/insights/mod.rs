//! Insight Engine - ranked financial observations
//!
//! The engine runs a set of pluggable rules over one snapshot and its derived
//! figures (health score, spending trend, goal analysis), then ranks what
//! they found. Rules are pure: the same context always yields the same
//! insights.
//!
//! ## Built-in Rules
//!
//! - **Overspending**, **Category Spike**, **Budget Alert** - anomalies
//! - **Health Check** - low health score
//! - **Trend Watch** - month-over-month spending movement
//! - **Goal Pace** - goals behind schedule
//! - **Savings Tip**, **Upcoming Bills** - suggestions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate(&ctx);
//! ```

pub mod anomaly;
pub mod engine;
pub mod goal_pace;
pub mod health_check;
pub mod tips;
pub mod trend_watch;
pub mod types;

pub use anomaly::{BudgetAlertRule, CategorySpikeRule, OverspendingRule};
pub use engine::{rank, AnalysisContext, InsightEngine, InsightRule};
pub use goal_pace::GoalPaceRule;
pub use health_check::HealthRule;
pub use tips::{SavingsTipRule, UpcomingBillRule};
pub use trend_watch::TrendRule;
pub use types::{money, Insight, InsightKind, Severity};
