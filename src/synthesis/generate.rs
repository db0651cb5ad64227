//! Validated end-to-end document generation.
//!
//! Each call validates its input, lays out and styles a fresh sheet, and
//! saves it under the configured output directory. Nothing is written when
//! validation fails.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::{trip_total, validate_application, validate_expense_report};
use crate::config::PaperworkConfig;
use crate::error::{PaperworkError, PaperworkResult};
use crate::models::{AdditionalCostEntry, ApplicationForm, EmployeeTripEntry, TripMetadata};

use super::application::synthesize_application;
use super::report::synthesize_expense_report;
use super::writer::save_document;

/// Which form a generated file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// The post-trip expense report.
    ExpenseReport,
    /// The pre-trip application.
    Application,
}

/// A document written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Which form was generated.
    pub kind: DocumentKind,
    /// Full path of the saved file.
    pub path: PathBuf,
    /// File name within the output directory.
    pub file_name: String,
    /// Grand total of the trip, for expense reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
}

fn sanitize_destination(destination: &str) -> String {
    destination.replace([' ', '/'], "_")
}

/// File name of the expense report for a trip.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use trip_paperwork::models::{ExtraDutyDays, TripMetadata};
/// use trip_paperwork::synthesis::report_file_name;
///
/// let trip = TripMetadata {
///     project_manager: "문성대".to_string(),
///     project_name: "조류 관측".to_string(),
///     destination: "서울 / 인천".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 4, 8).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     purpose: "회의".to_string(),
///     extra_duty: ExtraDutyDays::default(),
/// };
/// assert_eq!(report_file_name(&trip), "출장복명서_서울___인천_20250407.xlsx");
/// ```
pub fn report_file_name(trip: &TripMetadata) -> String {
    format!(
        "출장복명서_{}_{}.xlsx",
        sanitize_destination(&trip.destination),
        trip.start_date.format("%Y%m%d")
    )
}

/// File name of a trip application issued on `issued_on`.
pub fn application_file_name(form: &ApplicationForm, issued_on: NaiveDate) -> String {
    format!(
        "출장신청서_{}_{}.xlsx",
        sanitize_destination(&form.destination),
        issued_on.format("%Y%m%d")
    )
}

fn ensure_output_dir(dir: &Path) -> PaperworkResult<()> {
    fs::create_dir_all(dir).map_err(|e| PaperworkError::Write {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}

/// Generates and saves an expense report.
///
/// # Errors
///
/// Returns [`PaperworkError::Validation`] when required metadata is missing,
/// and [`PaperworkError::Write`] when the file cannot be saved.
pub fn generate_expense_report(
    config: &PaperworkConfig,
    employees: &[EmployeeTripEntry],
    costs: &[AdditionalCostEntry],
    issued_on: NaiveDate,
) -> PaperworkResult<GeneratedDocument> {
    validate_expense_report(employees, costs)?;
    let trip = employees
        .first()
        .map(|entry| &entry.trip)
        .ok_or_else(|| PaperworkError::validation("employees", "최소 1명의 출장자를 추가해주세요."))?;

    let document = synthesize_expense_report(employees, costs, &config.organization, issued_on);
    let file_name = report_file_name(trip);
    let path = config.output_dir.join(&file_name);

    ensure_output_dir(&config.output_dir)?;
    save_document(&document, &config.font_name, &path)?;

    let total = trip_total(employees, costs);
    info!(
        file = %file_name,
        employees = employees.len(),
        costs = costs.len(),
        total = %total,
        "Generated expense report"
    );

    Ok(GeneratedDocument {
        kind: DocumentKind::ExpenseReport,
        path,
        file_name,
        total_amount: Some(total),
    })
}

/// Generates and saves a trip application.
///
/// # Errors
///
/// Returns [`PaperworkError::Validation`] for a missing project name or
/// purpose, or a traveler count outside 1..=8.
pub fn generate_application(
    config: &PaperworkConfig,
    form: &ApplicationForm,
    issued_on: NaiveDate,
) -> PaperworkResult<GeneratedDocument> {
    validate_application(form)?;

    let document = synthesize_application(form, &config.organization, issued_on);
    let file_name = application_file_name(form, issued_on);
    let path = config.output_dir.join(&file_name);

    ensure_output_dir(&config.output_dir)?;
    save_document(&document, &config.font_name, &path)?;

    info!(
        file = %file_name,
        travelers = form.travelers.len(),
        "Generated trip application"
    );

    Ok(GeneratedDocument {
        kind: DocumentKind::Application,
        path,
        file_name,
        total_amount: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtraDutyDays, Traveler};
    use chrono::NaiveTime;

    fn config(dir: &Path) -> PaperworkConfig {
        PaperworkConfig {
            output_dir: dir.join("out"),
            ..PaperworkConfig::default()
        }
    }

    fn trip() -> TripMetadata {
        TripMetadata {
            project_manager: "김남현".to_string(),
            project_name: "연안 침식 조사".to_string(),
            destination: "태안".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
            end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            purpose: "해안선 측량".to_string(),
            extra_duty: ExtraDutyDays::new(0, 2, 0).unwrap(),
        }
    }

    fn employee() -> EmployeeTripEntry {
        EmployeeTripEntry {
            employee_name: "이서연".to_string(),
            position: "선임연구원".to_string(),
            trip_days: 2,
            daily_allowance_rate: Decimal::from(40_000),
            meal_rate: Decimal::from(20_000),
            daily_allowance_total: Decimal::from(80_000),
            meal_total: Decimal::from(40_000),
            trip: trip(),
        }
    }

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 6).unwrap()
    }

    #[test]
    fn test_generate_expense_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let costs = vec![AdditionalCostEntry::new("숙박비", "법인카드", Decimal::from(70_000))];

        let generated =
            generate_expense_report(&config(dir.path()), &[employee()], &costs, issued()).unwrap();

        assert_eq!(generated.kind, DocumentKind::ExpenseReport);
        assert_eq!(generated.file_name, "출장복명서_태안_20250804.xlsx");
        assert_eq!(generated.total_amount, Some(Decimal::from(190_000)));
        assert!(generated.path.exists());
    }

    #[test]
    fn test_invalid_report_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut entry = employee();
        entry.trip.destination = String::new();

        let result = generate_expense_report(&config(dir.path()), &[entry], &[], issued());

        match result {
            Err(PaperworkError::Validation { field, .. }) => assert_eq!(field, "destination"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_generate_application_uses_issue_date_in_name() {
        let dir = tempfile::tempdir().unwrap();
        let form = ApplicationForm {
            project_manager: "김남현".to_string(),
            project_name: "연안 침식 조사".to_string(),
            destination: "태안".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
            purpose: "해안선 측량".to_string(),
            company_car: String::new(),
            public_transport: "KTX".to_string(),
            travelers: vec![Traveler {
                position: "연구원".to_string(),
                name: "박지훈".to_string(),
                account: "급여 계좌".to_string(),
                note: String::new(),
            }],
        };

        let generated = generate_application(&config(dir.path()), &form, issued()).unwrap();

        assert_eq!(generated.file_name, "출장신청서_태안_20250806.xlsx");
        assert_eq!(generated.total_amount, None);
        assert!(generated.path.exists());
    }
}
