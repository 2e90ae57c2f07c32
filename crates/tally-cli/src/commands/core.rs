//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Month/year totals overview
//! - `cmd_renew` - Run the monthly renewal job body once

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::Database;
use tally_core::models::Period;

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::open(path_str).context("Failed to open database")
}

pub fn cmd_init(db: &Database) -> Result<()> {
    println!("🔧 Database ready at {}", db.path());
    println!();
    println!("Next steps:");
    println!("  1. Record an expense:  tally spend food_out 12.50");
    println!("  2. Render your chart:  tally chart");
    Ok(())
}

pub fn cmd_status(db: &Database, user_id: i64) -> Result<()> {
    let month_spent = db.month_total_expenses(user_id)?;
    let year_spent = db.year_total_expenses(user_id)?;
    let month_saved = db.savings_total(user_id, Period::Month)?;
    let year_saved = db.savings_total(user_id, Period::Year)?;
    let month_subs = db.month_subscription_expenses(user_id)?;

    println!();
    println!("📊 Totals for user {}", user_id);
    println!("   ─────────────────────────────────");
    println!("   This month spent   {:>10.2}€", month_spent);
    println!("   └ subscriptions    {:>10.2}€", month_subs);
    println!("   This month saved   {:>10.2}€", month_saved);
    println!("   This year spent    {:>10.2}€", year_spent);
    println!("   This year saved    {:>10.2}€", year_saved);

    Ok(())
}

pub fn cmd_renew(db: &Database) -> Result<()> {
    let renewed = db
        .renew_active_subscriptions()
        .context("Monthly renewal failed")?;

    if renewed == 0 {
        println!("✅ Nothing to renew (all active subscriptions are current)");
    } else {
        println!("✅ Renewed {} subscription(s)", renewed);
    }
    Ok(())
}
