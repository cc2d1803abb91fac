//! Report command implementations
//!
//! Every command has a text rendering and a `--json` rendering of the same
//! part of the report.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_core::{money, Grade, OracleReport, Policy, Severity, TrendDirection};

use super::bar;

const RULE: &str = "   ─────────────────────────────────────────────";

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

pub fn cmd_report(report: &OracleReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    print!("{}", format_summary(report));
    print!("{}", format_health(report));
    print!("{}", format_trend(report));
    print!("{}", format_goals(report));
    print!("{}", format_insights(report));
    Ok(())
}

pub fn cmd_health(report: &OracleReport, json: bool) -> Result<()> {
    if json {
        return print_json(&report.health);
    }
    print!("{}", format_health(report));
    Ok(())
}

pub fn cmd_trend(report: &OracleReport, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "trend": report.trend,
            "velocity": report.velocity,
        }));
    }
    print!("{}", format_trend(report));
    Ok(())
}

pub fn cmd_goals(report: &OracleReport, json: bool) -> Result<()> {
    if json {
        return print_json(&report.goals);
    }
    print!("{}", format_goals(report));
    Ok(())
}

pub fn cmd_insights(report: &OracleReport, json: bool) -> Result<()> {
    if json {
        return print_json(&report.insights);
    }
    print!("{}", format_insights(report));
    Ok(())
}

pub fn cmd_policy(policy: &Policy, json: bool) -> Result<()> {
    if json {
        return print_json(policy);
    }
    let text = toml::to_string_pretty(policy).context("Failed to serialize policy")?;
    print!("{}", text);
    Ok(())
}

pub fn format_summary(report: &OracleReport) -> String {
    let s = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "📒 Month {} (as of {})", s.month, s.today);
    let _ = writeln!(out, "{}", RULE);

    if !s.availability.has_expenses && !s.availability.has_incomes && report.goals.is_empty() {
        let _ = writeln!(out, "   No data yet. Add incomes, expenses or goals to a ledger.");
        return out;
    }

    let _ = writeln!(out, "   Income:   {:>12}", money(s.income_total));
    let _ = writeln!(out, "   Spent:    {:>12}", money(s.expense_total));
    let _ = writeln!(out, "   Net:      {:>12}", money(s.net()));
    let _ = writeln!(
        out,
        "   {} spent: {}",
        s.previous_month,
        money(s.previous_expense_total)
    );
    out
}

pub fn format_health(report: &OracleReport) -> String {
    let h = &report.health;
    let mut out = String::new();

    let icon = match h.grade {
        Grade::Excellent => "💚",
        Grade::Good => "💛",
        Grade::Fair => "🧡",
        Grade::Poor => "❤️",
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "{} Financial Health: {}/100 ({})", icon, h.score, h.grade.label());
    let _ = writeln!(out, "   {}", bar(h.score, 30));

    match h.savings_rate {
        Some(rate) => {
            let _ = writeln!(out, "   Savings rate: {:.1}%", rate * 100.0);
        }
        None => {
            let _ = writeln!(out, "   Savings rate: n/a (no income this month)");
        }
    }

    let b = &h.breakdown;
    let _ = writeln!(out, "   Savings:  {:>3.0}%", b.savings * 100.0);
    let _ = writeln!(out, "   Spending: {:>3.0}%", b.spending * 100.0);
    match b.goals {
        Some(goals) => {
            let _ = writeln!(out, "   Goals:    {:>3.0}%", goals * 100.0);
        }
        None => {
            let _ = writeln!(out, "   Goals:    none");
        }
    }
    out
}

pub fn format_trend(report: &OracleReport) -> String {
    let t = &report.trend;
    let v = &report.velocity;
    let mut out = String::new();

    let _ = writeln!(out);
    if !t.has_baseline() {
        let _ = writeln!(
            out,
            "📈 Spending Trend: no spending last month to compare ({} so far)",
            money(t.current_total)
        );
    } else {
        let label = match t.direction {
            TrendDirection::Up => format!("up {}%", t.change_percent),
            TrendDirection::Down => format!("down {}%", t.change_percent.unsigned_abs()),
            TrendDirection::Flat => "flat".to_string(),
        };
        let _ = writeln!(out, "📈 Spending Trend: {} {}", t.direction.arrow(), label);
        let _ = writeln!(
            out,
            "   {} this month vs {} last month",
            money(t.current_total),
            money(t.previous_total)
        );
    }

    if v.days_elapsed > 0 {
        let _ = writeln!(
            out,
            "   Day {}/{}: {} a day, on pace for {}",
            v.days_elapsed,
            v.days_in_month,
            money(v.daily_average),
            money(v.projected_total)
        );
    }
    out
}

pub fn format_goals(report: &OracleReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "🎯 Goals");
    let _ = writeln!(out, "{}", RULE);

    if report.goals.is_empty() {
        let _ = writeln!(out, "   No active goals.");
        return out;
    }

    for a in &report.goals {
        let status = if a.is_completed {
            "✅ done"
        } else if a.is_behind_schedule {
            "⚠️  behind"
        } else {
            "on track"
        };
        let _ = writeln!(
            out,
            "   {:20} {} {:>3}%  {}",
            a.goal.name,
            bar(a.progress_percent, 20),
            a.progress_percent,
            status
        );

        let mut detail = format!(
            "{} of {}",
            money(a.goal.current_amount),
            money(a.goal.target_amount)
        );
        if let Some(days) = a.days_remaining {
            if days >= 0 {
                let _ = write!(detail, ", {} days left", days);
            } else {
                let _ = write!(detail, ", {} days past target", -days);
            }
        }
        if let Some(monthly) = a.monthly_needed.filter(|_| !a.is_completed) {
            let _ = write!(detail, ", {} a month needed", money(monthly));
        }
        let _ = writeln!(out, "   {:20} {}", "", detail);
    }
    out
}

pub fn format_insights(report: &OracleReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "💡 Insights");
    let _ = writeln!(out, "{}", RULE);

    if report.insights.is_empty() {
        let _ = writeln!(out, "   Nothing to analyze yet.");
        return out;
    }

    for insight in &report.insights {
        let marker = match insight.severity {
            Severity::Alert => "🚨",
            Severity::Warning => "⚠️ ",
            Severity::Attention => "👀",
            Severity::Info => insight.kind.icon(),
        };
        let _ = writeln!(out, "   {} {}", marker, insight.title);
        let _ = writeln!(out, "      {}", insight.content);
    }
    out
}
