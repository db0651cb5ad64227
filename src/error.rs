//! Error types for the trip paperwork engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading data, validating
//! trip input and writing documents.

use thiserror::Error;

/// The main error type for the trip paperwork engine.
///
/// # Example
///
/// ```
/// use trip_paperwork::error::PaperworkError;
///
/// let error = PaperworkError::EmployeeNotFound {
///     name: "홍길동".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found in rate table: 홍길동");
/// ```
#[derive(Debug, Error)]
pub enum PaperworkError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A data file (rate table, option list) was not found.
    #[error("Data file not found: {path}")]
    DataFileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A data file could not be read or written.
    #[error("Data file error '{path}': {message}")]
    DataFileError {
        /// The path of the data file.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The employee has no usable row in the rate table.
    #[error("Employee not found in rate table: {name}")]
    EmployeeNotFound {
        /// The employee name that was looked up.
        name: String,
    },

    /// Input failed a required-field or range check.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A user-facing description of the problem.
        message: String,
    },

    /// An entry with the same name is already present.
    #[error("Duplicate entry: {name}")]
    DuplicateEntry {
        /// The duplicated name.
        name: String,
    },

    /// An index did not address an existing entry.
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of entries.
        len: usize,
    },

    /// The spreadsheet could not be assembled.
    #[error("Render error: {message}")]
    Render {
        /// A description of the failure.
        message: String,
    },

    /// The generated document could not be written.
    #[error("Failed to write document '{path}': {message}")]
    Write {
        /// The destination path.
        path: String,
        /// The underlying I/O or serializer message.
        message: String,
    },
}

impl PaperworkError {
    /// Shorthand for a [`PaperworkError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return PaperworkError.
pub type PaperworkResult<T> = Result<T, PaperworkError>;
