//! Tally CLI - Personal finance insight engine
//!
//! Usage:
//!   tally report                        Everything at a glance
//!   tally insights --ledger ledger.json Top ranked insights
//!   tally health --today 2024-03-20     Health score as of a date
//!   tally policy                        Effective thresholds

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tally_core::{Oracle, OracleReport, Policy};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let policy = commands::load_policy(cli.policy.as_deref())?;

    match cli.command {
        Commands::Report => commands::cmd_report(&analyze(&cli, policy)?, cli.json),
        Commands::Health => commands::cmd_health(&analyze(&cli, policy)?, cli.json),
        Commands::Trend => commands::cmd_trend(&analyze(&cli, policy)?, cli.json),
        Commands::Goals => commands::cmd_goals(&analyze(&cli, policy)?, cli.json),
        Commands::Insights => commands::cmd_insights(&analyze(&cli, policy)?, cli.json),
        Commands::Policy => commands::cmd_policy(&policy, cli.json),
    }
}

/// Load the ledger named on the command line and run the full analysis
fn analyze(cli: &Cli, policy: Policy) -> Result<OracleReport> {
    let inputs = commands::Inputs {
        ledger: cli.ledger.as_deref(),
        expenses: cli.expenses.as_deref(),
        incomes: cli.incomes.as_deref(),
    };
    let ledger = commands::load_inputs(&inputs)?;
    let today = commands::resolve_today(cli.today.as_deref())?;
    Ok(Oracle::new(policy).analyze(&ledger, today))
}
