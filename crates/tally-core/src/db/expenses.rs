//! Expense operations

use rusqlite::params;

use super::{parse_date, today, Database};
use crate::aggregate::CategoryTotal;
use crate::categories::Category;
use crate::error::{Error, Result};
use crate::models::Expense;

impl Database {
    /// Record an expense for today
    pub fn add_expense(&self, user_id: i64, category: Category, amount: f64) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (user_id, category, amount, date) VALUES (?, ?, ?, ?)",
            params![user_id, category.as_str(), amount, today()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Current-month totals per category, largest first.
    ///
    /// This is the aggregation engine's input: one row per category that
    /// has at least one expense this month.
    pub fn month_category_totals(&self, user_id: i64) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS total
            FROM expenses
            WHERE user_id = ? AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')
            GROUP BY category
            ORDER BY total DESC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    /// Total spent this month: expenses plus subscriptions charged this month
    pub fn month_total_expenses(&self, user_id: i64) -> Result<f64> {
        let conn = self.conn()?;
        let total: Option<f64> = conn.query_row(
            r#"
            SELECT SUM(total_amount) FROM (
                SELECT SUM(amount) AS total_amount
                FROM expenses
                WHERE user_id = ?1 AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')
                UNION ALL
                SELECT SUM(amount) AS total_amount
                FROM subscriptions
                WHERE user_id = ?1 AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')
            )
            "#,
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    /// Total spent this year: expenses plus every subscription charge
    /// (amount times renewal count) started this year
    pub fn year_total_expenses(&self, user_id: i64) -> Result<f64> {
        let conn = self.conn()?;
        let total: Option<f64> = conn.query_row(
            r#"
            SELECT SUM(total_amount) FROM (
                SELECT SUM(amount) AS total_amount
                FROM expenses
                WHERE user_id = ?1 AND strftime('%Y', date) = strftime('%Y', 'now')
                UNION ALL
                SELECT SUM(amount * count) AS total_amount
                FROM subscriptions
                WHERE user_id = ?1 AND amount > 0 AND strftime('%Y', date) = strftime('%Y', 'now')
            )
            "#,
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    /// Raw expense rows for one user, newest first; current month only
    /// unless `all_time`
    pub fn list_expenses(&self, user_id: i64, all_time: bool) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut query = String::from(
            "SELECT id, user_id, category, amount, date FROM expenses WHERE user_id = ?",
        );
        if !all_time {
            query.push_str(" AND strftime('%Y-%m', date) = strftime('%Y-%m', 'now')");
        }
        query.push_str(" ORDER BY date DESC, id DESC");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut expenses = Vec::new();
        for row in rows {
            let (id, user_id, category, amount, date) = row?;
            let category = category.parse::<Category>().map_err(Error::InvalidData)?;
            expenses.push(Expense {
                id,
                user_id,
                category,
                amount,
                date: parse_date(&date),
            });
        }
        Ok(expenses)
    }
}
