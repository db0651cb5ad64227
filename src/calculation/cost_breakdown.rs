//! Per-employee cost breakdown.
//!
//! This module multiplies an employee's per-diem rates by the trip-day count
//! and turns the result into an [`EmployeeTripEntry`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{EmployeeRate, EmployeeTripEntry, TripMetadata};

use super::trip_days::calculate_trip_days;

/// The per-diem cost of one employee for one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCostBreakdown {
    /// Number of trip days the rates were multiplied by.
    pub trip_days: u32,
    /// `trip_days × daily allowance`.
    pub daily_allowance_total: Decimal,
    /// `trip_days × meal rate`.
    pub meal_total: Decimal,
    /// Daily allowance total plus meal total.
    pub total: Decimal,
}

/// Calculates an employee's per-diem totals for a trip.
///
/// # Examples
///
/// ```
/// use trip_paperwork::calculation::calculate_employee_cost;
/// use trip_paperwork::models::EmployeeRate;
/// use rust_decimal::Decimal;
///
/// let rate = EmployeeRate {
///     name: "김민수".to_string(),
///     position: "책임연구원".to_string(),
///     daily_allowance: Decimal::from(50_000),
///     meal_rate: Decimal::from(20_000),
/// };
///
/// let breakdown = calculate_employee_cost(&rate, 3);
/// assert_eq!(breakdown.daily_allowance_total, Decimal::from(150_000));
/// assert_eq!(breakdown.meal_total, Decimal::from(60_000));
/// assert_eq!(breakdown.total, Decimal::from(210_000));
/// ```
pub fn calculate_employee_cost(rate: &EmployeeRate, trip_days: u32) -> EmployeeCostBreakdown {
    let days = Decimal::from(trip_days);
    let daily_allowance_total = days * rate.daily_allowance;
    let meal_total = days * rate.meal_rate;

    EmployeeCostBreakdown {
        trip_days,
        daily_allowance_total,
        meal_total,
        total: daily_allowance_total + meal_total,
    }
}

/// Prices an employee for a trip and builds the roster entry.
pub fn build_trip_entry(rate: &EmployeeRate, trip: &TripMetadata) -> EmployeeTripEntry {
    let trip_days = calculate_trip_days(
        trip.start_date,
        trip.start_time,
        trip.end_date,
        trip.end_time,
    );
    let breakdown = calculate_employee_cost(rate, trip_days);

    debug!(
        employee = %rate.name,
        trip_days,
        total = %breakdown.total,
        "Priced employee trip entry"
    );

    EmployeeTripEntry {
        employee_name: rate.name.clone(),
        position: rate.position.clone(),
        trip_days,
        daily_allowance_rate: rate.daily_allowance,
        meal_rate: rate.meal_rate,
        daily_allowance_total: breakdown.daily_allowance_total,
        meal_total: breakdown.meal_total,
        trip: trip.clone(),
    }
}
