//! Shared loading utilities
//!
//! This module contains:
//! - `load_inputs` - Build the ledger from JSON and CSV files
//! - `load_policy` - Resolve the policy file
//! - `resolve_today` - Pick the analysis date

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::import::{load_expenses_csv, load_incomes_csv, load_ledger};
use tally_core::{Clock, Ledger, LocalClock, Policy};

/// Ledger used when `--ledger` is not given
pub const DEFAULT_LEDGER: &str = "ledger.json";

/// Input files named on the command line
#[derive(Debug, Default)]
pub struct Inputs<'a> {
    pub ledger: Option<&'a Path>,
    pub expenses: Option<&'a Path>,
    pub incomes: Option<&'a Path>,
}

/// Load the ledger and merge CSV imports into it.
///
/// An explicit `--ledger` must exist. Without one, `./ledger.json` is read
/// when present and an empty ledger is used otherwise, so CSV-only runs work.
pub fn load_inputs(inputs: &Inputs<'_>) -> Result<Ledger> {
    let mut ledger = match inputs.ledger {
        Some(path) => load_ledger(path)
            .with_context(|| format!("Failed to load ledger {}", path.display()))?,
        None => {
            let default = Path::new(DEFAULT_LEDGER);
            if default.exists() {
                load_ledger(default).context("Failed to load ledger.json")?
            } else {
                tracing::debug!("No ledger file, starting from an empty ledger");
                Ledger::default()
            }
        }
    };

    if let Some(path) = inputs.expenses {
        let expenses = load_expenses_csv(path)
            .with_context(|| format!("Failed to import expenses from {}", path.display()))?;
        tracing::info!("Imported {} expenses from {}", expenses.len(), path.display());
        ledger.merge(Ledger {
            expenses,
            ..Default::default()
        });
    }

    if let Some(path) = inputs.incomes {
        let incomes = load_incomes_csv(path)
            .with_context(|| format!("Failed to import incomes from {}", path.display()))?;
        tracing::info!("Imported {} incomes from {}", incomes.len(), path.display());
        ledger.merge(Ledger {
            incomes,
            ..Default::default()
        });
    }

    Ok(ledger)
}

/// Load the policy from an explicit path, the user config, or the defaults
pub fn load_policy(path: Option<&Path>) -> Result<Policy> {
    Policy::load(path).context("Failed to load policy")
}

/// Parse `--today`, falling back to the local calendar date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(LocalClock.today()),
    }
}
