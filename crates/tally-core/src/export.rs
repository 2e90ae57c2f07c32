//! Report export: raw records as spreadsheet (CSV) files
//!
//! One file per table (expenses, savings, subscriptions) so a report
//! keeps the three record kinds separate. Columns carry display headers,
//! dates are reformatted for reading, and internal ids are dropped.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::db::Database;
use crate::error::Result;

/// Human date format used in report cells
const REPORT_DATE_FORMAT: &str = "%d %B %Y";

/// Options for report generation
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include all records instead of the current month only
    pub all_time: bool,
}

fn report_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Write a report for one user under `out_dir`, returning the paths of
/// the files produced (expenses, savings, subscriptions).
pub fn write_report(
    db: &Database,
    user_id: i64,
    opts: ReportOptions,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    info!(
        "Creating {} report for user {}",
        if opts.all_time { "all-time" } else { "monthly" },
        user_id
    );

    std::fs::create_dir_all(out_dir)?;

    let expenses_path = out_dir.join(format!("user_{}_expenses.csv", user_id));
    let savings_path = out_dir.join(format!("user_{}_savings.csv", user_id));
    let subscriptions_path = out_dir.join(format!("user_{}_subscriptions.csv", user_id));

    write_expenses(db, user_id, opts, &expenses_path)?;
    write_savings(db, user_id, opts, &savings_path)?;
    write_subscriptions(db, user_id, opts, &subscriptions_path)?;

    info!("Report creation complete");
    Ok(vec![expenses_path, savings_path, subscriptions_path])
}

fn write_expenses(db: &Database, user_id: i64, opts: ReportOptions, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Category", "Amount (€)", "Date"])?;

    for expense in db.list_expenses(user_id, opts.all_time)? {
        writer.write_record([
            expense.category.label(),
            &format!("{:.2}", expense.amount),
            &report_date(expense.date),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_savings(db: &Database, user_id: i64, opts: ReportOptions, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Amount (€)", "Date"])?;

    for saving in db.list_savings(user_id, opts.all_time)? {
        writer.write_record([&format!("{:.2}", saving.amount), &report_date(saving.date)])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_subscriptions(
    db: &Database,
    user_id: i64,
    opts: ReportOptions,
    path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Name", "Amount (€)", "Renewals", "Active", "Date"])?;

    for sub in db.list_subscriptions(user_id, opts.all_time)? {
        writer.write_record([
            sub.name.as_str(),
            &format!("{:.2}", sub.amount),
            &sub.renewals.to_string(),
            yes_no(sub.is_active),
            &report_date(sub.last_charged),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
