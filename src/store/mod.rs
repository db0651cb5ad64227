//! File-backed data the forms draw on.
//!
//! This module loads the employee rate table, the editable option lists and
//! the project names, and bundles them into the catalog served to clients.

mod catalog;
mod option_store;
mod project_names;
mod rate_table;

pub use catalog::OptionCatalog;
pub use option_store::{
    DESTINATIONS, OptionStore, OptionSummary, PROJECT_MANAGERS, default_options,
};
pub use project_names::load_project_names;
pub use rate_table::RateTable;
