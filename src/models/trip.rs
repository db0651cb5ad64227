//! Trip metadata and per-employee trip entries.
//!
//! This module defines the data a traveler confirms on the form: the shared
//! trip metadata, the extra-duty day counts, and the priced
//! [`EmployeeTripEntry`] that feeds the expense report.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PaperworkError;

/// Upper bound for each extra-duty day count.
pub const MAX_EXTRA_DUTY_DAYS: u8 = 5;

/// Days of extra duty claimed for a trip.
///
/// Each count is between 0 and [`MAX_EXTRA_DUTY_DAYS`]. Values are checked
/// on construction and on deserialization.
///
/// # Example
///
/// ```
/// use trip_paperwork::models::ExtraDutyDays;
///
/// let days = ExtraDutyDays::new(1, 2, 0).unwrap();
/// assert!(days.requires_photo_attachment());
/// assert!(ExtraDutyDays::new(6, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExtraDutyDays")]
pub struct ExtraDutyDays {
    holiday: u8,
    special: u8,
    dangerous: u8,
}

#[derive(Deserialize)]
struct RawExtraDutyDays {
    #[serde(default)]
    holiday: u8,
    #[serde(default)]
    special: u8,
    #[serde(default)]
    dangerous: u8,
}

impl TryFrom<RawExtraDutyDays> for ExtraDutyDays {
    type Error = PaperworkError;

    fn try_from(raw: RawExtraDutyDays) -> Result<Self, Self::Error> {
        Self::new(raw.holiday, raw.special, raw.dangerous)
    }
}

impl ExtraDutyDays {
    /// Creates a set of extra-duty counts, rejecting any count above the limit.
    pub fn new(holiday: u8, special: u8, dangerous: u8) -> Result<Self, PaperworkError> {
        for (field, value) in [
            ("holiday", holiday),
            ("special", special),
            ("dangerous", dangerous),
        ] {
            if value > MAX_EXTRA_DUTY_DAYS {
                return Err(PaperworkError::validation(
                    format!("extra_duty.{field}"),
                    format!("must be between 0 and {MAX_EXTRA_DUTY_DAYS}, got {value}"),
                ));
            }
        }
        Ok(Self {
            holiday,
            special,
            dangerous,
        })
    }

    /// Days travelled on weekends or public holidays.
    pub fn holiday(&self) -> u8 {
        self.holiday
    }

    /// Days of special duty (vessel boarding, ocean survey).
    pub fn special(&self) -> u8 {
        self.special
    }

    /// Days of dangerous duty (diving, seabed survey).
    pub fn dangerous(&self) -> u8 {
        self.dangerous
    }

    /// Returns true when boarding-proof photos must be attached.
    pub fn requires_photo_attachment(&self) -> bool {
        self.special > 0 || self.dangerous > 0
    }
}

/// Metadata shared by every traveler on one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripMetadata {
    /// The project manager approving the trip.
    pub project_manager: String,
    /// The research project the trip is charged to.
    pub project_name: String,
    /// Where the trip goes.
    pub destination: String,
    /// Departure date.
    pub start_date: NaiveDate,
    /// Departure time.
    pub start_time: NaiveTime,
    /// Return date.
    pub end_date: NaiveDate,
    /// Return time.
    pub end_time: NaiveTime,
    /// Purpose or outcome of the trip.
    pub purpose: String,
    /// Extra-duty day counts.
    #[serde(default)]
    pub extra_duty: ExtraDutyDays,
}

impl TripMetadata {
    /// Departure as printed on the expense report.
    pub fn departure_label(&self) -> String {
        format_trip_moment(self.start_date, self.start_time)
    }

    /// Return as printed on the expense report.
    pub fn return_label(&self) -> String {
        format_trip_moment(self.end_date, self.end_time)
    }
}

fn format_trip_moment(date: NaiveDate, time: NaiveTime) -> String {
    format!(
        "{} {}",
        date.format("%Y년  %m월 %d일"),
        time.format("%H시 %M분")
    )
}

/// One priced traveler on a trip.
///
/// Created once when the traveler is added and never modified afterwards;
/// removing and re-adding is the only way to change an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTripEntry {
    /// The traveler's name.
    pub employee_name: String,
    /// The traveler's position.
    pub position: String,
    /// Inclusive trip-day count (at least 1).
    pub trip_days: u32,
    /// Daily allowance per day.
    pub daily_allowance_rate: Decimal,
    /// Meal cost per day.
    pub meal_rate: Decimal,
    /// `trip_days × daily_allowance_rate`.
    pub daily_allowance_total: Decimal,
    /// `trip_days × meal_rate`.
    pub meal_total: Decimal,
    /// The trip this entry belongs to.
    pub trip: TripMetadata,
}

impl EmployeeTripEntry {
    /// Daily allowance plus meal cost for the whole trip.
    pub fn subtotal(&self) -> Decimal {
        self.daily_allowance_total + self.meal_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> TripMetadata {
        TripMetadata {
            project_manager: "이정석".to_string(),
            project_name: "해양 환경 모니터링".to_string(),
            destination: "여수".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 5, 0).unwrap(),
            purpose: "수질 시료 채취".to_string(),
            extra_duty: ExtraDutyDays::default(),
        }
    }

    #[test]
    fn test_extra_duty_rejects_counts_above_limit() {
        let err = ExtraDutyDays::new(0, 6, 0).unwrap_err();
        match err {
            PaperworkError::Validation { field, .. } => assert_eq!(field, "extra_duty.special"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_duty_photo_attachment_rule() {
        assert!(!ExtraDutyDays::new(3, 0, 0).unwrap().requires_photo_attachment());
        assert!(ExtraDutyDays::new(0, 2, 0).unwrap().requires_photo_attachment());
        assert!(ExtraDutyDays::new(0, 0, 1).unwrap().requires_photo_attachment());
    }

    #[test]
    fn test_extra_duty_deserialization_validates() {
        let ok: ExtraDutyDays = serde_json::from_str(r#"{"holiday": 2}"#).unwrap();
        assert_eq!(ok, ExtraDutyDays::new(2, 0, 0).unwrap());

        let bad: Result<ExtraDutyDays, _> = serde_json::from_str(r#"{"dangerous": 9}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_trip_labels_use_report_format() {
        let trip = sample_trip();
        assert_eq!(trip.departure_label(), "2025년  03월 04일 08시 30분");
        assert_eq!(trip.return_label(), "2025년  03월 06일 18시 05분");
    }

    #[test]
    fn test_trip_metadata_deserializes_without_extra_duty() {
        let json = r#"{
            "project_manager": "이정석",
            "project_name": "해양 환경 모니터링",
            "destination": "여수",
            "start_date": "2025-03-04",
            "start_time": "08:30:00",
            "end_date": "2025-03-06",
            "end_time": "18:05:00",
            "purpose": "수질 시료 채취"
        }"#;
        let trip: TripMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(trip, sample_trip());
    }
}
