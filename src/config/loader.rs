//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the paperwork
//! configuration from a directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PaperworkError, PaperworkResult};

use super::types::PaperworkConfig;

/// The configuration file name inside a configuration directory.
pub const CONFIG_FILE_NAME: &str = "paperwork.yaml";

/// Loads and provides access to the paperwork configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── paperwork.yaml       # Organization, fonts, paths, option suggestions
/// ├── rates.csv            # 이름,직급,일비,식비
/// ├── project_names.csv    # Project names in the first column
/// └── options.json         # Created on first run
/// ```
///
/// # Example
///
/// ```no_run
/// use trip_paperwork::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Issuing organization: {}", loader.config().organization.short_name);
/// # Ok::<(), trip_paperwork::error::PaperworkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PaperworkConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Relative paths inside the file are resolved against the directory.
    ///
    /// # Returns
    ///
    /// Returns an error if `paperwork.yaml` is missing or is not valid YAML
    /// for [`PaperworkConfig`].
    pub fn load<P: AsRef<Path>>(path: P) -> PaperworkResult<Self> {
        let dir = path.as_ref();
        let file = dir.join(CONFIG_FILE_NAME);
        let path_str = file.display().to_string();

        let content = fs::read_to_string(&file).map_err(|_| PaperworkError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut config: PaperworkConfig =
            serde_yaml::from_str(&content).map_err(|e| PaperworkError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
        config.resolve_paths(dir);

        debug!(path = %path_str, "Loaded paperwork configuration");
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PaperworkConfig) -> Self {
        Self { config }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PaperworkConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> PaperworkConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().organization.short_name, "㈜엔이비");
        assert_eq!(
            loader.config().organization.formal_name,
            "주 식 회 사 엔 이 비"
        );
        assert!(!loader.config().company_vehicles.is_empty());
    }

    #[test]
    fn test_relative_paths_resolve_against_directory() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(
            loader.config().rate_table,
            PathBuf::from("./config").join("rates.csv")
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(PaperworkError::ConfigNotFound { path }) => {
                assert!(path.contains(CONFIG_FILE_NAME));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_malformed_file_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "organization: [unclosed").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(PaperworkError::ConfigParseError { path, .. }) => {
                assert!(path.contains(CONFIG_FILE_NAME));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
