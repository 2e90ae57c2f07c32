//! Saving operations

use rusqlite::params;

use super::{parse_date, today, Database};
use crate::error::Result;
use crate::models::{Period, Saving};

impl Database {
    /// Record a saving for today
    pub fn add_saving(&self, user_id: i64, amount: f64) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO savings (user_id, amount, date) VALUES (?, ?, ?)",
            params![user_id, amount, today()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Total saved in the current month or year
    pub fn savings_total(&self, user_id: i64, period: Period) -> Result<f64> {
        let conn = self.conn()?;

        let filter = match period {
            Period::Month => "strftime('%Y-%m', date) = strftime('%Y-%m', 'now')",
            Period::Year => "strftime('%Y', date) = strftime('%Y', 'now')",
        };
        let query = format!(
            "SELECT SUM(amount) FROM savings WHERE user_id = ? AND {}",
            filter
        );

        let total: Option<f64> = conn.query_row(&query, params![user_id], |row| row.get(0))?;
        Ok(total.unwrap_or(0.0))
    }

    /// Raw saving rows for one user, newest first; current month only
    /// unless `all_time`
    pub fn list_savings(&self, user_id: i64, all_time: bool) -> Result<Vec<Saving>> {
        let conn = self.conn()?;

        let mut query =
            String::from("SELECT id, user_id, amount, date FROM savings WHERE user_id = ?");
        if !all_time {
            query.push_str(" AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')");
        }
        query.push_str(" ORDER BY date DESC, id DESC");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(Saving {
                id: row.get(0)?,
                user_id: row.get(1)?,
                amount: row.get(2)?,
                date: parse_date(&row.get::<_, String>(3)?),
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }
}
