//! Insight Engine - runs rules over a snapshot and ranks the results

use std::collections::HashSet;

use crate::config::Policy;
use crate::goals::GoalAnalysis;
use crate::health::HealthScore;
use crate::snapshot::FinancialSnapshot;
use crate::trend::SpendingTrend;

use super::types::{money, Insight, InsightKind, Severity};
use super::{
    BudgetAlertRule, CategorySpikeRule, GoalPaceRule, HealthRule, OverspendingRule,
    SavingsTipRule, TrendRule, UpcomingBillRule,
};

/// Everything a rule may look at. All of it is derived from one snapshot.
pub struct AnalysisContext<'a> {
    pub snapshot: &'a FinancialSnapshot,
    pub health: &'a HealthScore,
    pub trend: &'a SpendingTrend,
    pub goals: &'a [GoalAnalysis],
    pub policy: &'a Policy,
}

/// Trait for insight rules
pub trait InsightRule: Send + Sync {
    /// Kind of insight this rule produces
    fn kind(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect the context and produce zero or more insights
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// The insight engine that runs every registered rule
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(OverspendingRule));
        engine.register(Box::new(CategorySpikeRule));
        engine.register(Box::new(BudgetAlertRule));
        engine.register(Box::new(HealthRule));
        engine.register(Box::new(TrendRule));
        engine.register(Box::new(GoalPaceRule));
        engine.register(Box::new(SavingsTipRule));
        engine.register(Box::new(UpcomingBillRule));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Register an insight rule
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Names of registered rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule, rank the findings and cap the list.
    ///
    /// An empty snapshot yields no insights at all. A snapshot with data
    /// where no rule fires yields exactly one summary insight.
    pub fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        if ctx.snapshot.is_empty() {
            tracing::debug!("No data to analyze, skipping insight rules");
            return vec![];
        }

        let mut all = vec![];
        for rule in &self.rules {
            let found = rule.evaluate(ctx);
            tracing::debug!(
                rule = rule.name(),
                kind = rule.kind().as_str(),
                count = found.len(),
                "Insight rule evaluated"
            );
            all.extend(found);
        }

        if all.is_empty() {
            return vec![all_good(ctx)];
        }

        let mut ranked = rank(all);
        ranked.truncate(ctx.policy.insights.max_insights);
        ranked
    }
}

/// Sort by severity (highest first), then most recently relevant, then
/// weight, then key; drop later duplicates of a key.
pub fn rank(mut insights: Vec<Insight>) -> Vec<Insight> {
    insights.sort_by(|a, b| {
        b.severity
            .priority()
            .cmp(&a.severity.priority())
            .then_with(|| b.relevant_on.cmp(&a.relevant_on))
            .then_with(|| b.weight.cmp(&a.weight))
            .then_with(|| a.key.cmp(&b.key))
    });

    let mut seen = HashSet::new();
    insights.retain(|i| seen.insert(i.key.clone()));
    insights
}

/// The single neutral insight shown when nothing needs attention
fn all_good(ctx: &AnalysisContext<'_>) -> Insight {
    let snapshot = ctx.snapshot;
    let content = if snapshot.current_expenses.is_empty() && snapshot.current_incomes.is_empty() {
        "Nothing needs your attention right now. Keep logging incomes and expenses to get richer insights.".to_string()
    } else {
        format!(
            "Nothing needs your attention this month. You've spent {} so far and your health score is {} ({}).",
            money(snapshot.current_expense_total()),
            ctx.health.score,
            ctx.health.grade.label()
        )
    };

    Insight::new(
        InsightKind::Summary,
        "summary:all_good",
        Severity::Info,
        "All good",
        content,
        snapshot.today,
    )
}
