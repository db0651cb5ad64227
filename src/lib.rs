//! Business-trip paperwork engine.
//!
//! This crate prices business trips from an employee rate table, groups
//! additional costs, and synthesizes the expense report ("출장복명서") and
//! trip application ("출장신청서") as print-ready `.xlsx` workbooks. An axum
//! HTTP API exposes generation and the editable option lists.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod synthesis;
