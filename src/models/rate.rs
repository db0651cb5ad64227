//! Employee per-diem rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position and per-diem rates of one employee, as listed in the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRate {
    /// The employee's name (lookup key).
    pub name: String,
    /// The employee's position.
    pub position: String,
    /// Daily allowance per trip day.
    pub daily_allowance: Decimal,
    /// Meal cost per trip day.
    pub meal_rate: Decimal,
}
