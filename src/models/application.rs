//! Trip application form data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of traveler rows on the application form.
pub const APPLICATION_TRAVELER_ROWS: usize = 8;

/// Account text used when a traveler gives no account number.
pub const DEFAULT_ACCOUNT: &str = "급여 계좌";

fn default_account() -> String {
    DEFAULT_ACCOUNT.to_string()
}

/// One traveler row on the application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    /// The traveler's position.
    pub position: String,
    /// The traveler's name.
    pub name: String,
    /// Account the allowance is paid to.
    #[serde(default = "default_account")]
    pub account: String,
    /// Free-form remark.
    #[serde(default)]
    pub note: String,
}

/// Everything printed on a trip application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    /// The project manager approving the trip.
    pub project_manager: String,
    /// The research project the trip is charged to.
    pub project_name: String,
    /// Where the trip goes.
    pub destination: String,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip.
    pub end_date: NaiveDate,
    /// Purpose of the trip.
    pub purpose: String,
    /// Company car, if one is used.
    #[serde(default)]
    pub company_car: String,
    /// Public transport mode (항공, 철도, 선박, 기타), if any.
    #[serde(default)]
    pub public_transport: String,
    /// Travelers in display order (at most [`APPLICATION_TRAVELER_ROWS`]).
    #[serde(default)]
    pub travelers: Vec<Traveler>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traveler_account_defaults_to_salary_account() {
        let traveler: Traveler =
            serde_json::from_str(r#"{"position": "연구원", "name": "박지훈"}"#).unwrap();
        assert_eq!(traveler.account, "급여 계좌");
        assert_eq!(traveler.note, "");
    }
}
