//! Additional cost entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A free-form expense attached to the whole trip (lodging, fuel, ...).
///
/// Entries are grouped by exact item name only when a report is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCostEntry {
    /// Item name, free text or one of the configured suggestions.
    pub item: String,
    /// How the cost was paid (e.g., "법인카드\n(3619)").
    #[serde(default)]
    pub payment_method: String,
    /// Amount in whole currency units.
    pub amount: Decimal,
}

impl AdditionalCostEntry {
    /// Creates an entry.
    pub fn new(item: impl Into<String>, payment_method: impl Into<String>, amount: Decimal) -> Self {
        Self {
            item: item.into(),
            payment_method: payment_method.into(),
            amount,
        }
    }
}
