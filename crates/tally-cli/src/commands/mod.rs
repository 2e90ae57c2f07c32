//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db) plus init/status/renew
//! - `records` - Expense and saving entry
//! - `chart` - Monthly breakdown chart rendering
//! - `report` - CSV report export
//! - `subscriptions` - Subscription management

pub mod chart;
pub mod core;
pub mod records;
pub mod report;
pub mod subscriptions;

// Re-export command functions for main.rs
pub use chart::*;
pub use core::*;
pub use records::*;
pub use report::*;
pub use subscriptions::*;

use anyhow::{bail, Result};
use tally_core::session::parse_amount;

/// Parse a user-typed amount argument, comma decimals allowed
pub fn parse_amount_arg(input: &str) -> Result<f64> {
    match parse_amount(input) {
        Some(v) => Ok(v),
        None => bail!("Not a valid amount: {} (try e.g. 5.50 or 5,50)", input),
    }
}
