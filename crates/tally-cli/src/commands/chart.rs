//! Chart command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::aggregate::aggregate;
use tally_core::chart::ChartScheduler;
use tally_core::db::Database;

/// Aggregate this month's totals and render the breakdown chart.
///
/// The artifact is left in place and its path printed; in the bot this is
/// where the message layer would attach and then delete the file.
pub async fn cmd_chart(db: &Database, user_id: i64, out_dir: &Path) -> Result<()> {
    let totals = db
        .month_category_totals(user_id)
        .context("Failed to load month totals")?;

    let series = aggregate(&totals).context("Failed to aggregate category totals")?;

    let scheduler = ChartScheduler::new(out_dir);
    let artifact = scheduler
        .render(&series)
        .await
        .context("Chart rendering failed")?;

    println!("📊 Chart written to {}", artifact.display());
    for entry in series.iter() {
        println!("   {:20} {:>10.2}€", entry.label, entry.value);
    }

    Ok(())
}
