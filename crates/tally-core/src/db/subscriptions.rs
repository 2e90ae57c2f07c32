//! Subscription operations
//!
//! A subscription row tracks its monthly charge amount, how many times it
//! has been charged (`count`), whether it is active, and the date of the
//! most recent charge. The renewal job bumps count and date for every
//! active subscription whose last charge is from an earlier month.

use rusqlite::params;
use tracing::info;

use super::{parse_date, today, Database};
use crate::error::{Error, Result};
use crate::models::Subscription;

impl Database {
    /// Add a new subscription, active, charged once today
    pub fn add_subscription(&self, user_id: i64, name: &str, amount: f64) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO subscriptions (user_id, name, amount, count, is_active, date) \
             VALUES (?, ?, ?, 1, 1, ?)",
            params![user_id, name, amount, today()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Stop a subscription from renewing; history is kept
    pub fn disable_subscription(&self, user_id: i64, name: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE subscriptions SET is_active = 0 WHERE user_id = ? AND name = ?",
            params![user_id, name],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("subscription {}", name)));
        }
        Ok(())
    }

    /// Re-enable a subscription. If its last charge is from an earlier
    /// month, catching up counts as one new charge dated today; within
    /// the same month, re-enabling does not double-charge.
    pub fn enable_subscription(&self, user_id: i64, name: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE subscriptions
            SET is_active = 1,
                count = CASE
                    WHEN strftime('%Y-%m', date) < strftime('%Y-%m', 'now') THEN count + 1
                    ELSE count
                END,
                date = CASE
                    WHEN strftime('%Y-%m', date) < strftime('%Y-%m', 'now') THEN ?
                    ELSE date
                END
            WHERE user_id = ? AND name = ?
            "#,
            params![today(), user_id, name],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("subscription {}", name)));
        }
        Ok(())
    }

    /// Per-name charge totals, largest first. `current_month_only`
    /// restricts to subscriptions charged this month.
    pub fn subscriptions_breakdown(
        &self,
        user_id: i64,
        is_active: bool,
        current_month_only: bool,
    ) -> Result<Vec<(String, f64)>> {
        let conn = self.conn()?;

        let mut query = String::from(
            "SELECT name, SUM(amount) AS total FROM subscriptions \
             WHERE user_id = ? AND is_active = ?",
        );
        if current_month_only {
            query.push_str(" AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')");
        }
        query.push_str(" GROUP BY name ORDER BY total DESC");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![user_id, is_active], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    /// Sum of active subscription charges dated this month
    pub fn month_subscription_expenses(&self, user_id: i64) -> Result<f64> {
        let conn = self.conn()?;
        let total: Option<f64> = conn.query_row(
            "SELECT SUM(amount) FROM subscriptions \
             WHERE user_id = ? AND is_active = 1 \
             AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    /// The monthly renewal job body: charge every active subscription
    /// whose last charge is from an earlier month. Returns the number of
    /// subscriptions renewed. Idempotent within a month.
    pub fn renew_active_subscriptions(&self) -> Result<usize> {
        let conn = self.conn()?;
        let renewed = conn.execute(
            r#"
            UPDATE subscriptions
            SET count = count + 1, date = ?
            WHERE is_active = 1
            AND strftime('%Y-%m', date) < strftime('%Y-%m', 'now')
            "#,
            params![today()],
        )?;
        info!("Renewed {} active subscriptions", renewed);
        Ok(renewed)
    }

    /// Raw subscription rows for one user; current month only unless
    /// `all_time`
    pub fn list_subscriptions(&self, user_id: i64, all_time: bool) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;

        let mut query = String::from(
            "SELECT id, user_id, name, amount, count, is_active, date \
             FROM subscriptions WHERE user_id = ?",
        );
        if !all_time {
            query.push_str(" AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')");
        }
        query.push_str(" ORDER BY is_active DESC, name");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(Subscription {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                amount: row.get(3)?,
                renewals: row.get(4)?,
                is_active: row.get(5)?,
                last_charged: parse_date(&row.get::<_, String>(6)?),
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }
}
