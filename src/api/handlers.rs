//! HTTP request handlers for the trip paperwork API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{PaperworkError, PaperworkResult};
use crate::store::{OptionCatalog, OptionStore};
use crate::synthesis::{generate_application, generate_expense_report};

use super::request::{ApplicationRequest, OptionValueRequest, ReportRequest};
use super::response::{ApiError, ApiErrorResponse, EmployeeSummary, OptionListResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reports", post(create_report))
        .route("/applications", post(create_application))
        .route("/employees", get(list_employees))
        .route("/options", get(get_options))
        .route("/options/reset", post(reset_options))
        .route("/options/:key", post(add_option))
        .route("/options/:key/:value", delete(remove_option))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: PaperworkError, context: &str) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "{}", context);
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Handler for POST /reports.
///
/// Prices the named travelers from the rate table and writes the expense
/// report.
async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing expense report request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let issued_on = request.issued_on.unwrap_or_else(today);
    let result = request.resolve(state.rates()).and_then(|(employees, costs)| {
        generate_expense_report(state.config(), &employees, &costs, issued_on)
    });

    match result {
        Ok(document) => {
            info!(
                correlation_id = %correlation_id,
                file = %document.file_name,
                employees_count = request.employees.len(),
                costs_count = request.additional_costs.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Expense report generated"
            );
            json_response(StatusCode::CREATED, document)
        }
        Err(err) => error_response(correlation_id, err, "Expense report generation failed"),
    }
}

/// Handler for POST /applications.
async fn create_application(
    State(state): State<AppState>,
    payload: Result<Json<ApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing trip application request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let issued_on = request.issued_on.unwrap_or_else(today);
    match generate_application(state.config(), &request.form, issued_on) {
        Ok(document) => {
            info!(
                correlation_id = %correlation_id,
                file = %document.file_name,
                travelers_count = request.form.travelers.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Trip application generated"
            );
            json_response(StatusCode::CREATED, document)
        }
        Err(err) => error_response(correlation_id, err, "Trip application generation failed"),
    }
}

/// Handler for GET /employees.
async fn list_employees(State(state): State<AppState>) -> Response {
    let employees: Vec<EmployeeSummary> = state
        .rates()
        .rates()
        .iter()
        .map(|rate| EmployeeSummary {
            name: rate.name.clone(),
            position: rate.position.clone(),
        })
        .collect();
    json_response(StatusCode::OK, employees)
}

/// Handler for GET /options.
async fn get_options(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.project_names() {
        Ok(project_names) => {
            let catalog = state
                .with_options(|store| OptionCatalog::assemble(store, project_names, state.config()));
            json_response(StatusCode::OK, catalog)
        }
        Err(err) => error_response(correlation_id, err, "Option catalog unavailable"),
    }
}

enum OptionChange {
    Applied(Vec<String>),
    Unchanged,
    UnknownKey,
}

fn change_option(
    state: &AppState,
    key: &str,
    change: impl FnOnce(&mut OptionStore) -> PaperworkResult<bool>,
) -> PaperworkResult<OptionChange> {
    state.with_options(|store| {
        if store.values(key).is_none() {
            return Ok(OptionChange::UnknownKey);
        }
        if !change(store)? {
            return Ok(OptionChange::Unchanged);
        }
        let values = store.values(key).map(<[String]>::to_vec).unwrap_or_default();
        Ok(OptionChange::Applied(values))
    })
}

/// Handler for POST /options/:key.
async fn add_option(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<OptionValueRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match change_option(&state, &key, |store| store.add(&key, &request.value)) {
        Ok(OptionChange::Applied(values)) => {
            info!(correlation_id = %correlation_id, key = %key, value = %request.value, "Option added");
            json_response(StatusCode::CREATED, OptionListResponse { key, values })
        }
        Ok(OptionChange::Unchanged) => json_response(
            StatusCode::CONFLICT,
            ApiError::with_details(
                "OPTION_UNCHANGED",
                format!("'{}' was not added to '{key}'", request.value),
                "The value is blank or already listed",
            ),
        ),
        Ok(OptionChange::UnknownKey) => {
            json_response(StatusCode::NOT_FOUND, ApiError::option_key_not_found(&key))
        }
        Err(err) => error_response(correlation_id, err, "Option store update failed"),
    }
}

/// Handler for DELETE /options/:key/:value.
async fn remove_option(
    State(state): State<AppState>,
    Path((key, value)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match change_option(&state, &key, |store| store.remove(&key, &value)) {
        Ok(OptionChange::Applied(values)) => {
            info!(correlation_id = %correlation_id, key = %key, value = %value, "Option removed");
            json_response(StatusCode::OK, OptionListResponse { key, values })
        }
        Ok(OptionChange::Unchanged) => json_response(
            StatusCode::NOT_FOUND,
            ApiError::new(
                "OPTION_VALUE_NOT_FOUND",
                format!("'{value}' is not listed in '{key}'"),
            ),
        ),
        Ok(OptionChange::UnknownKey) => {
            json_response(StatusCode::NOT_FOUND, ApiError::option_key_not_found(&key))
        }
        Err(err) => error_response(correlation_id, err, "Option store update failed"),
    }
}

/// Handler for POST /options/reset.
async fn reset_options(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.with_options(|store| store.reset().map(|()| store.summary())) {
        Ok(summary) => {
            info!(correlation_id = %correlation_id, "Option store reset to defaults");
            json_response(StatusCode::OK, summary)
        }
        Err(err) => error_response(correlation_id, err, "Option store reset failed"),
    }
}
