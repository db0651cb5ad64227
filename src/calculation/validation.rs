//! Required-field checks run before any document is generated.
//!
//! A failed check blocks generation: nothing is laid out and no file is
//! written. Messages are the ones shown to the form user.

use rust_decimal::Decimal;

use crate::error::{PaperworkError, PaperworkResult};
use crate::models::{
    APPLICATION_TRAVELER_ROWS, AdditionalCostEntry, ApplicationForm, EmployeeTripEntry,
};

fn require(field: &str, value: &str, message: &str) -> PaperworkResult<()> {
    if value.trim().is_empty() {
        return Err(PaperworkError::validation(field, message));
    }
    Ok(())
}

/// Checks the inputs of an expense report.
///
/// At least one traveler is required; the first traveler's trip metadata
/// must name a project, a project manager, a destination and a purpose.
/// Additional cost amounts may not be negative.
pub fn validate_expense_report(
    employees: &[EmployeeTripEntry],
    costs: &[AdditionalCostEntry],
) -> PaperworkResult<()> {
    let first = employees.first().ok_or_else(|| {
        PaperworkError::validation("employees", "최소 1명의 출장자를 추가해주세요.")
    })?;

    let trip = &first.trip;
    require("project_name", &trip.project_name, "연구과제명을 입력해주세요.")?;
    require("project_manager", &trip.project_manager, "과제책임자를 입력해주세요.")?;
    require("destination", &trip.destination, "출장지를 입력해주세요.")?;
    require("purpose", &trip.purpose, "출장 목적을 입력해주세요.")?;

    if let Some(cost) = costs.iter().find(|cost| cost.amount < Decimal::ZERO) {
        return Err(PaperworkError::validation(
            "additional_costs",
            format!("'{}' 금액은 0 이상이어야 합니다.", cost.item),
        ));
    }

    Ok(())
}

/// Checks the inputs of a trip application.
///
/// The project name and purpose are required, and the form holds between
/// one and [`APPLICATION_TRAVELER_ROWS`] travelers.
pub fn validate_application(form: &ApplicationForm) -> PaperworkResult<()> {
    require("project_name", &form.project_name, "연구과제명을 입력해주세요.")?;
    require("purpose", &form.purpose, "출장 목적을 입력해주세요.")?;

    if form.travelers.is_empty() {
        return Err(PaperworkError::validation(
            "travelers",
            "최소 1명의 출장자를 추가해주세요.",
        ));
    }
    if form.travelers.len() > APPLICATION_TRAVELER_ROWS {
        return Err(PaperworkError::validation(
            "travelers",
            format!("출장자는 최대 {APPLICATION_TRAVELER_ROWS}명까지 입력할 수 있습니다."),
        ));
    }
    Ok(())
}
