//! Subscription command implementations

use anyhow::{Context, Result};
use tally_core::db::Database;

use super::parse_amount_arg;

pub fn cmd_sub_add(db: &Database, user_id: i64, name: &str, amount: &str) -> Result<()> {
    let amount = parse_amount_arg(amount)?;
    db.add_subscription(user_id, name, amount)?;
    println!("✅ Subscription added: {} at {:.2}€/month", name, amount);
    Ok(())
}

pub fn cmd_sub_disable(db: &Database, user_id: i64, name: &str) -> Result<()> {
    db.disable_subscription(user_id, name)
        .with_context(|| format!("Could not disable {}", name))?;
    println!("➖ Subscription disabled: {}", name);
    Ok(())
}

pub fn cmd_sub_enable(db: &Database, user_id: i64, name: &str) -> Result<()> {
    db.enable_subscription(user_id, name)
        .with_context(|| format!("Could not enable {}", name))?;
    println!("➕ Subscription enabled: {}", name);
    Ok(())
}

pub fn cmd_sub_list(db: &Database, user_id: i64, all_time: bool) -> Result<()> {
    let subscriptions = db.list_subscriptions(user_id, all_time)?;

    if subscriptions.is_empty() {
        println!("No subscriptions yet. Add one:");
        println!("  tally sub add Streaming 9.99");
        return Ok(());
    }

    println!();
    println!("📝 Subscriptions");
    println!("   ────────────────────────────────────────────");

    for sub in subscriptions {
        let status_icon = if sub.is_active { "✅" } else { "🚫" };
        println!(
            "   {} {:20} │ {:>8.2}€ │ {} renewal(s) │ last {}",
            status_icon, sub.name, sub.amount, sub.renewals, sub.last_charged
        );
    }

    Ok(())
}
