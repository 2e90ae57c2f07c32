//! Tally Core Library
//!
//! Shared functionality for the Tally expense-tracking bot:
//! - Category registry (keys, display labels, keyboard labels)
//! - Aggregation engine (per-category totals -> chart-ready series)
//! - Chart rendering with a bounded async scheduler
//! - Database access for expenses, savings, and subscriptions
//! - Spreadsheet report export
//! - Per-user conversational session state

pub mod aggregate;
pub mod categories;
pub mod chart;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod session;

pub use aggregate::{
    aggregate, CategoryTotal, ChartSeries, SeriesEntry, MIN_CATEGORY_PERCENTAGE, NO_DATA_VALUE,
};
pub use categories::{label_for_key, Category, MISC_LABEL, NO_DATA_LABEL};
pub use chart::{strip_emoji, ChartScheduler, MAX_CONCURRENT_RENDERS};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{write_report, ReportOptions};
pub use models::{Expense, Period, Saving, Subscription};
pub use session::{parse_amount, Pending, SessionStore};
