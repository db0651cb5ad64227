//! Application state for the trip paperwork API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{ConfigLoader, PaperworkConfig};
use crate::error::PaperworkResult;
use crate::store::{OptionStore, RateTable, load_project_names};

/// Shared application state.
///
/// The configuration and rate table are read-only; the option store is the
/// only mutable resource and sits behind a mutex.
#[derive(Clone)]
pub struct AppState {
    config: Arc<PaperworkConfig>,
    rates: Arc<RateTable>,
    options: Arc<Mutex<OptionStore>>,
}

impl AppState {
    /// Creates a new application state from loaded resources.
    pub fn new(config: PaperworkConfig, rates: RateTable, options: OptionStore) -> Self {
        Self {
            config: Arc::new(config),
            rates: Arc::new(rates),
            options: Arc::new(Mutex::new(options)),
        }
    }

    /// Loads the rate table and option store named by the configuration.
    pub fn load(loader: ConfigLoader) -> PaperworkResult<Self> {
        let config = loader.into_config();
        let rates = RateTable::load(&config.rate_table)?;
        let options = OptionStore::load(&config.option_store)?;
        Ok(Self::new(config, rates, options))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PaperworkConfig {
        &self.config
    }

    /// Returns the employee rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Runs `f` with exclusive access to the option store.
    pub fn with_options<R>(&self, f: impl FnOnce(&mut OptionStore) -> R) -> R {
        let mut guard = self.options.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Reads the project name list named by the configuration.
    pub fn project_names(&self) -> PaperworkResult<Vec<String>> {
        load_project_names(&self.config.project_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_load_from_bundled_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigLoader::load("./config").unwrap().into_config();
        config.option_store = dir.path().join("options.json");

        let state = AppState::load(ConfigLoader::from_config(config)).unwrap();

        assert!(state.rates().lookup("김민수").is_some());
        assert!(state.with_options(|store| store.validate().is_ok()));
        assert_eq!(state.project_names().unwrap().len(), 3);
    }
}
