//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared loading utilities (ledger, CSV imports, policy, date)
//! - `reports` - Report commands (report, health, trend, goals, insights, policy)

pub mod core;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use reports::*;

/// Text progress bar, `width` cells wide
pub fn bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
