//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - See where your month is heading
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance health, trends and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger JSON file (defaults to ./ledger.json when present)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Expenses CSV to merge into the ledger (date,amount,category,description)
    #[arg(long, global = true)]
    pub expenses: Option<PathBuf>,

    /// Incomes CSV to merge into the ledger (date,amount,source,recurring,description)
    #[arg(long, global = true)]
    pub incomes: Option<PathBuf>,

    /// Policy TOML file with threshold overrides
    ///
    /// Without this flag the user policy in the data directory is used when
    /// present, otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub policy: Option<PathBuf>,

    /// Analyze as of this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full report: summary, health, trend, goals and insights
    Report,

    /// Show the financial health score and its breakdown
    Health,

    /// Compare this month's spending with last month
    Trend,

    /// Show progress for each savings goal
    Goals,

    /// Show the top ranked insights
    Insights,

    /// Print the effective policy
    Policy,
}
