//! Per-user conversational session state
//!
//! The chat flow is two-step: the user picks an action (say, a spending
//! category), then sends the amount in a follow-up message. The pending
//! action lives here between the two messages, keyed by user id, with an
//! explicit lifecycle: set on selection, taken (or cleared) when the
//! follow-up arrives or the flow is abandoned. The store is injected into
//! handlers rather than reached for as a global.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::categories::Category;

/// What the next message from a user will be interpreted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// An amount for the selected spending category
    ExpenseAmount(Category),
    /// An amount saved
    SavingAmount,
    /// A name for a new subscription
    SubscriptionName,
    /// An amount for the named subscription
    SubscriptionAmount,
}

/// In-process pending-input store keyed by user id
#[derive(Debug, Default)]
pub struct SessionStore {
    pending: Mutex<HashMap<i64, Pending>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what the user's next message means, replacing any earlier
    /// pending action for that user.
    pub fn set(&self, user_id: i64, pending: Pending) {
        self.pending
            .lock()
            .expect("session lock poisoned")
            .insert(user_id, pending);
    }

    /// Consume the pending action, ending the two-step flow.
    pub fn take(&self, user_id: i64) -> Option<Pending> {
        self.pending
            .lock()
            .expect("session lock poisoned")
            .remove(&user_id)
    }

    /// Peek without consuming.
    pub fn get(&self, user_id: i64) -> Option<Pending> {
        self.pending
            .lock()
            .expect("session lock poisoned")
            .get(&user_id)
            .copied()
    }

    /// Drop any pending action (user cancelled or navigated away).
    pub fn clear(&self, user_id: i64) {
        self.pending
            .lock()
            .expect("session lock poisoned")
            .remove(&user_id);
    }
}

/// Parse a user-typed amount.
///
/// Accepts a comma decimal separator ("5,50"). Returns `None` for
/// anything that is not a non-negative finite number; bad input is an
/// expected reply path, not an error.
pub fn parse_amount(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_take_lifecycle() {
        let store = SessionStore::new();
        store.set(7, Pending::ExpenseAmount(Category::FoodOut));

        assert_eq!(
            store.get(7),
            Some(Pending::ExpenseAmount(Category::FoodOut))
        );
        assert_eq!(
            store.take(7),
            Some(Pending::ExpenseAmount(Category::FoodOut))
        );
        // consumed
        assert_eq!(store.take(7), None);
    }

    #[test]
    fn test_set_replaces_pending() {
        let store = SessionStore::new();
        store.set(7, Pending::SavingAmount);
        store.set(7, Pending::SubscriptionName);
        assert_eq!(store.take(7), Some(Pending::SubscriptionName));
    }

    #[test]
    fn test_users_are_independent() {
        let store = SessionStore::new();
        store.set(1, Pending::SavingAmount);
        assert_eq!(store.get(2), None);
        store.clear(2);
        assert_eq!(store.get(1), Some(Pending::SavingAmount));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.00"), Some(12.0));
        assert_eq!(parse_amount("5,50"), Some(5.5));
        assert_eq!(parse_amount(" 7 "), Some(7.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("lots"), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount(""), None);
    }
}
