//! HTTP API module for the trip paperwork engine.
//!
//! This module provides the REST endpoints that generate expense reports and
//! trip applications, list employees, and edit the option lists.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApplicationRequest, OptionValueRequest, ReportRequest};
pub use response::{ApiError, ApiErrorResponse, EmployeeSummary, OptionListResponse};
pub use state::AppState;
