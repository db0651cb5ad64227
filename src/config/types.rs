//! Configuration types for paperwork generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `paperwork.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Names the issuing organization prints on its forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Compact name used inside header tables (e.g., "㈜엔이비").
    pub short_name: String,
    /// Letter-spaced name printed under the signature lines.
    pub formal_name: String,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            short_name: "㈜엔이비".to_string(),
            formal_name: "주 식 회 사 엔 이 비".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_font_name() -> String {
    "맑은 고딕".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_rate_table() -> PathBuf {
    PathBuf::from("rates.csv")
}

fn default_option_store() -> PathBuf {
    PathBuf::from("options.json")
}

fn default_project_names() -> PathBuf {
    PathBuf::from("project_names.csv")
}

fn default_cost_items() -> Vec<String> {
    [
        "숙박비", "주유비", "재료비", "교통비", "식비", "통신비", "소모품비", "회의비", "주차비",
        "기타",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// The complete paperwork configuration loaded from `paperwork.yaml`.
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration. File paths are relative to the configuration directory
/// until [`PaperworkConfig::resolve_paths`] anchors them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperworkConfig {
    /// The issuing organization.
    #[serde(default)]
    pub organization: Organization,
    /// Font family applied to every cell.
    #[serde(default = "default_font_name")]
    pub font_name: String,
    /// Directory generated documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// CSV file of employee positions and per-diem rates.
    #[serde(default = "default_rate_table")]
    pub rate_table: PathBuf,
    /// JSON file holding the editable option lists.
    #[serde(default = "default_option_store")]
    pub option_store: PathBuf,
    /// CSV file whose first column lists project names.
    #[serde(default = "default_project_names")]
    pub project_names: PathBuf,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Suggested additional-cost item names.
    #[serde(default = "default_cost_items")]
    pub cost_items: Vec<String>,
    /// Company vehicles offered on the application form.
    #[serde(default)]
    pub company_vehicles: Vec<String>,
}

impl Default for PaperworkConfig {
    fn default() -> Self {
        Self {
            organization: Organization::default(),
            font_name: default_font_name(),
            output_dir: default_output_dir(),
            rate_table: default_rate_table(),
            option_store: default_option_store(),
            project_names: default_project_names(),
            server: ServerConfig::default(),
            cost_items: default_cost_items(),
            company_vehicles: Vec::new(),
        }
    }
}

impl PaperworkConfig {
    /// Anchors every relative file path at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.output_dir,
            &mut self.rate_table,
            &mut self.option_store,
            &mut self.project_names,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: PaperworkConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PaperworkConfig::default());
        assert_eq!(config.font_name, "맑은 고딕");
        assert_eq!(config.cost_items.len(), 10);
        assert_eq!(config.cost_items[0], "숙박비");
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let yaml = r#"
organization:
  short_name: "㈜테스트"
  formal_name: "주 식 회 사 테 스 트"
output_dir: "/tmp/out"
server:
  bind_addr: "0.0.0.0:9000"
"#;
        let config: PaperworkConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.organization.short_name, "㈜테스트");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.rate_table, PathBuf::from("rates.csv"));
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_paths() {
        let mut config = PaperworkConfig {
            output_dir: PathBuf::from("/var/paperwork"),
            ..PaperworkConfig::default()
        };
        config.resolve_paths(Path::new("/etc/trip"));

        assert_eq!(config.output_dir, PathBuf::from("/var/paperwork"));
        assert_eq!(config.rate_table, PathBuf::from("/etc/trip/rates.csv"));
        assert_eq!(config.option_store, PathBuf::from("/etc/trip/options.json"));
    }
}
