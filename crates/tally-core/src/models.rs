//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category: Category,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A recorded saving (money deliberately not spent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saving {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A recurring subscription
///
/// `renewals` counts how many monthly charges have been applied;
/// `last_charged` is the date of the most recent one. Inactive
/// subscriptions keep their history but stop renewing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub amount: f64,
    pub renewals: i64,
    pub is_active: bool,
    pub last_charged: NaiveDate,
}

/// Aggregation period for totals queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
