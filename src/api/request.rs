//! Request types for the trip paperwork API.
//!
//! This module defines the JSON bodies accepted by the document and option
//! endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{CostLedger, TripRoster, build_trip_entry};
use crate::error::{PaperworkError, PaperworkResult};
use crate::models::{AdditionalCostEntry, ApplicationForm, EmployeeTripEntry, TripMetadata};
use crate::store::RateTable;

/// Request body for `POST /reports`.
///
/// Travelers are named; their positions and rates come from the rate table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Metadata shared by every traveler.
    pub trip: TripMetadata,
    /// Traveler names, in report order.
    pub employees: Vec<String>,
    /// Additional costs, in submission order.
    #[serde(default)]
    pub additional_costs: Vec<AdditionalCostEntry>,
    /// Date printed on the report; today when omitted.
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
}

impl ReportRequest {
    /// Prices every named traveler and checks every cost submission.
    ///
    /// # Errors
    ///
    /// Returns [`PaperworkError::EmployeeNotFound`] for a name missing from
    /// the rate table, [`PaperworkError::DuplicateEntry`] for a name listed
    /// twice, and [`PaperworkError::Validation`] for a blank or non-positive
    /// cost submission.
    pub fn resolve(
        &self,
        rates: &RateTable,
    ) -> PaperworkResult<(Vec<EmployeeTripEntry>, Vec<AdditionalCostEntry>)> {
        let mut roster = TripRoster::new();
        for name in &self.employees {
            let rate = rates
                .lookup(name)
                .ok_or_else(|| PaperworkError::EmployeeNotFound { name: name.clone() })?;
            roster.add(build_trip_entry(rate, &self.trip))?;
        }

        let mut ledger = CostLedger::new();
        for cost in &self.additional_costs {
            ledger.add(cost.clone())?;
        }

        Ok((roster.entries().to_vec(), ledger.entries().to_vec()))
    }
}

/// Request body for `POST /applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRequest {
    /// The form contents.
    #[serde(flatten)]
    pub form: ApplicationForm,
    /// Date printed on the form and used in its file name; today when omitted.
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
}

/// Request body for `POST /options/:key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionValueRequest {
    /// The value to add.
    pub value: String,
}
