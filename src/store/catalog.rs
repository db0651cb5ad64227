//! The option catalog served to form clients.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PaperworkConfig;

use super::option_store::OptionStore;

/// Everything a form offers as a choice: the stored option lists, the
/// project names, and the configured cost items and company vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCatalog {
    /// Stored option lists by key (`project_managers`, `destinations`, ...).
    #[serde(flatten)]
    pub options: BTreeMap<String, Vec<String>>,
    /// Project names from the project list file.
    pub project_names: Vec<String>,
    /// Suggested additional-cost item names.
    pub cost_items: Vec<String>,
    /// Company vehicles for the application form.
    pub company_vehicles: Vec<String>,
}

impl OptionCatalog {
    /// Snapshots the store together with the configured lists.
    pub fn assemble(store: &OptionStore, project_names: Vec<String>, config: &PaperworkConfig) -> Self {
        Self {
            options: store.options().clone(),
            project_names,
            cost_items: config.cost_items.clone(),
            company_vehicles: config.company_vehicles.clone(),
        }
    }
}
