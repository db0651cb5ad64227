//! Response types for the trip paperwork API.
//!
//! This module defines the error body returned by every endpoint and its
//! mapping from [`PaperworkError`], plus the small success payloads that are
//! not domain types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PaperworkError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unknown option list error response.
    pub fn option_key_not_found(key: &str) -> Self {
        Self::with_details(
            "OPTION_KEY_NOT_FOUND",
            format!("Option list not found: {key}"),
            format!("The option list '{key}' does not exist"),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PaperworkError> for ApiErrorResponse {
    fn from(error: PaperworkError) -> Self {
        let message = error.to_string();
        match error {
            PaperworkError::ConfigNotFound { .. } | PaperworkError::ConfigParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            PaperworkError::DataFileNotFound { .. } | PaperworkError::DataFileError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("DATA_FILE_ERROR", "Data file error", message),
                )
            }
            PaperworkError::EmployeeNotFound { name } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    message,
                    format!("'{name}' has no usable row in the rate table"),
                ),
            ),
            PaperworkError::Validation { field, message } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, field),
            ),
            PaperworkError::DuplicateEntry { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("DUPLICATE_ENTRY", message),
            ),
            PaperworkError::IndexOutOfRange { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INDEX_OUT_OF_RANGE", message),
            ),
            PaperworkError::Render { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("RENDER_ERROR", "Document rendering failed", message),
            ),
            PaperworkError::Write { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("WRITE_ERROR", "Document could not be saved", message),
            ),
        }
    }
}

/// One entry of `GET /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee's name.
    pub name: String,
    /// The employee's position.
    pub position: String,
}

/// An option list after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionListResponse {
    /// The list key.
    pub key: String,
    /// The list values after the change.
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let response: ApiErrorResponse =
            PaperworkError::validation("purpose", "출장 목적을 입력해주세요.").into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(response.error.message, "출장 목적을 입력해주세요.");
        assert_eq!(response.error.details.as_deref(), Some("purpose"));
    }

    #[test]
    fn test_write_error_maps_to_server_error() {
        let response: ApiErrorResponse = PaperworkError::Write {
            path: "/readonly/out.xlsx".to_string(),
            message: "permission denied".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.error.details.unwrap().contains("permission denied"));
    }

    #[test]
    fn test_employee_not_found_maps_to_bad_request() {
        let response: ApiErrorResponse = PaperworkError::EmployeeNotFound {
            name: "홍길동".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "EMPLOYEE_NOT_FOUND");
    }
}
