//! Core data models for the trip paperwork engine.
//!
//! This module contains the domain models shared by the aggregator, the
//! synthesizers and the API.

mod application;
mod cost;
mod rate;
mod trip;

pub use application::{APPLICATION_TRAVELER_ROWS, ApplicationForm, DEFAULT_ACCOUNT, Traveler};
pub use cost::AdditionalCostEntry;
pub use rate::EmployeeRate;
pub use trip::{EmployeeTripEntry, ExtraDutyDays, MAX_EXTRA_DUTY_DAYS, TripMetadata};
