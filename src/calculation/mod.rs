//! Cost aggregation for trip paperwork.
//!
//! This module contains the trip-day count, per-employee cost breakdowns,
//! grouping of additional costs by item name, the ordered traveler and cost
//! collections with their running totals, and the required-field checks
//! that gate document generation.

mod cost_breakdown;
mod cost_grouping;
mod ledger;
mod trip_days;
mod validation;

pub use cost_breakdown::{EmployeeCostBreakdown, build_trip_entry, calculate_employee_cost};
pub use cost_grouping::{CostGroup, group_additional_costs, regroup};
pub use ledger::{CostLedger, ItemTotal, TripRoster, trip_total};
pub use trip_days::{calculate_trip_days, format_trip_period};
pub use validation::{validate_application, validate_expense_report};
