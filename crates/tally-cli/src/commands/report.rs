//! Report command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::Database;
use tally_core::export::{write_report, ReportOptions};

pub fn cmd_report(db: &Database, user_id: i64, all_time: bool, out_dir: &Path) -> Result<()> {
    let opts = ReportOptions { all_time };
    let paths = write_report(db, user_id, opts, out_dir).context("Report export failed")?;

    println!(
        "📄 {} report written:",
        if all_time { "All-time" } else { "Monthly" }
    );
    for path in paths {
        println!("   {}", path.display());
    }

    Ok(())
}
