//! Spending category registry
//!
//! A fixed, closed set of category keys. Each key maps to exactly one
//! display label (used in chart legends and reports) and one emoji label
//! (used by the chat keyboard). Raw keys are what the database stores.

use serde::{Deserialize, Serialize};

/// Display label used for the merged minority bucket and for the `other`
/// category itself.
pub const MISC_LABEL: &str = "Miscellaneous";

/// Label for the degenerate all-zero chart.
pub const NO_DATA_LABEL: &str = "No Data";

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FoodOut,
    Groceries,
    Entertainment,
    Smoking,
    Cloth,
    Tech,
    Beauty,
    Transport,
    Housing,
    Gifts,
    Debts,
    Other,
    Subscriptions,
}

impl Category {
    /// All categories in menu/keyboard order
    pub const ALL: [Category; 13] = [
        Self::FoodOut,
        Self::Groceries,
        Self::Entertainment,
        Self::Smoking,
        Self::Cloth,
        Self::Tech,
        Self::Beauty,
        Self::Transport,
        Self::Housing,
        Self::Gifts,
        Self::Debts,
        Self::Other,
        Self::Subscriptions,
    ];

    /// Stable key stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodOut => "food_out",
            Self::Groceries => "groceries",
            Self::Entertainment => "entertainment",
            Self::Smoking => "smoking",
            Self::Cloth => "cloth",
            Self::Tech => "tech",
            Self::Beauty => "beauty",
            Self::Transport => "transport",
            Self::Housing => "housing",
            Self::Gifts => "gifts",
            Self::Debts => "debts",
            Self::Other => "other",
            Self::Subscriptions => "subscriptions",
        }
    }

    /// User-facing label, emoji-free (safe for chart legends)
    pub fn label(&self) -> &'static str {
        match self {
            Self::FoodOut => "Fast Food",
            Self::Groceries => "Groceries",
            Self::Entertainment => "Nightlife",
            Self::Smoking => "Smoking",
            Self::Cloth => "Apparel",
            Self::Tech => "Electronics",
            Self::Beauty => "Beauty & Care",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Gifts => "Gifts",
            Self::Debts => "Debts",
            Self::Other => MISC_LABEL,
            Self::Subscriptions => "Subscriptions",
        }
    }

    /// Keyboard/menu label with emoji prefix
    pub fn emoji_label(&self) -> &'static str {
        match self {
            Self::FoodOut => "🍔 Fast Food",
            Self::Groceries => "🍎 Groceries",
            Self::Entertainment => "🎉 Nightlife",
            Self::Smoking => "🚬 Smoking",
            Self::Cloth => "👕 Apparel",
            Self::Tech => "🖥 Electronics",
            Self::Beauty => "💅 Beauty & Care",
            Self::Transport => "🚗 Transport",
            Self::Housing => "🏠 Housing",
            Self::Gifts => "🎁 Gifts",
            Self::Debts => "💸 Debts",
            Self::Other => "📦 Miscellaneous",
            Self::Subscriptions => "📝 Subscriptions",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food_out" | "food" => Ok(Self::FoodOut),
            "groceries" => Ok(Self::Groceries),
            "entertainment" => Ok(Self::Entertainment),
            "smoking" => Ok(Self::Smoking),
            "cloth" => Ok(Self::Cloth),
            "tech" => Ok(Self::Tech),
            "beauty" => Ok(Self::Beauty),
            "transport" => Ok(Self::Transport),
            "housing" => Ok(Self::Housing),
            "gifts" => Ok(Self::Gifts),
            "debts" => Ok(Self::Debts),
            "other" | "misc" => Ok(Self::Other),
            "subscriptions" => Ok(Self::Subscriptions),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a raw category key to its display label.
///
/// Returns `None` for keys outside the registry; callers fall back to the
/// raw key so unknown data still charts.
pub fn label_for_key(key: &str) -> Option<&'static str> {
    key.parse::<Category>().ok().map(|c| c.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for_key("food_out"), Some("Fast Food"));
        assert_eq!(label_for_key("other"), Some(MISC_LABEL));
        assert_eq!(label_for_key("lottery"), None);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }
}
