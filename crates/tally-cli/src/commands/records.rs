//! Expense and saving entry commands

use anyhow::{anyhow, Result};
use tally_core::categories::Category;
use tally_core::db::Database;
use tally_core::models::Period;

use super::parse_amount_arg;

pub fn cmd_spend(db: &Database, user_id: i64, category: &str, amount: &str) -> Result<()> {
    let category: Category = category
        .parse()
        .map_err(|e: String| anyhow!("{} (see tally spend --help for keys)", e))?;
    let amount = parse_amount_arg(amount)?;

    db.add_expense(user_id, category, amount)?;
    println!("✅ Added: {:.2}€ on {}", amount, category.emoji_label());

    Ok(())
}

pub fn cmd_save(db: &Database, user_id: i64, amount: &str) -> Result<()> {
    let amount = parse_amount_arg(amount)?;
    db.add_saving(user_id, amount)?;

    let month_total = db.savings_total(user_id, Period::Month)?;
    println!("✅ Added! 💰 Saved this month so far: {:.2}€", month_total);

    Ok(())
}
