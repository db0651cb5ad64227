//! Editable option lists persisted as JSON.
//!
//! The store is a JSON object mapping a list name to its values, for example
//! the project managers and destinations offered on the forms. It is
//! created with the default lists when missing, falls back to the defaults
//! when unreadable, and is saved after every successful change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{PaperworkError, PaperworkResult};

/// Key of the project manager list.
pub const PROJECT_MANAGERS: &str = "project_managers";
/// Key of the destination list.
pub const DESTINATIONS: &str = "destinations";

const DEFAULT_PROJECT_MANAGERS: [&str; 6] = ["이정석", "최태섭", "한영석", "김병모", "문성대", "김남현"];
const DEFAULT_DESTINATIONS: [&str; 17] = [
    "고창", "해평", "서울", "부산", "인천", "울산", "여수", "목포", "포항", "통영", "제주", "완도",
    "군산", "보령", "태안", "안산", "화성",
];

/// The built-in option lists.
pub fn default_options() -> BTreeMap<String, Vec<String>> {
    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }
    BTreeMap::from([
        (PROJECT_MANAGERS.to_string(), owned(&DEFAULT_PROJECT_MANAGERS)),
        (DESTINATIONS.to_string(), owned(&DEFAULT_DESTINATIONS)),
    ])
}

fn string_list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Keeps every well-formed list. A malformed built-in list falls back to its
/// default and a malformed custom list is dropped; missing built-in lists
/// are filled in.
fn repair_options(raw: BTreeMap<String, Value>, path: &Path) -> BTreeMap<String, Vec<String>> {
    let defaults = default_options();
    let mut options = BTreeMap::new();

    for (key, value) in raw {
        match string_list(value) {
            Some(values) => {
                options.insert(key, values);
            }
            None => match defaults.get(&key) {
                Some(default) => {
                    warn!(path = %path.display(), key = %key, "Malformed option list, using defaults");
                    options.insert(key, default.clone());
                }
                None => {
                    warn!(path = %path.display(), key = %key, "Dropping malformed option list");
                }
            },
        }
    }
    for (key, values) in defaults {
        options.entry(key).or_insert(values);
    }
    options
}

/// Size and contents of one option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSummary {
    /// Number of values.
    pub count: usize,
    /// The values in stored order.
    pub items: Vec<String>,
}

/// Option lists backed by a JSON file.
#[derive(Debug, Clone)]
pub struct OptionStore {
    path: PathBuf,
    options: BTreeMap<String, Vec<String>>,
}

impl OptionStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is created with the default lists. A file that is not
    /// a JSON object is logged and the defaults are used without overwriting
    /// it. Otherwise each list is repaired on its own: a malformed built-in
    /// list or a missing one takes its defaults, a malformed custom list is
    /// dropped, and every well-formed list is kept.
    pub fn load<P: AsRef<Path>>(path: P) -> PaperworkResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let store = Self {
                path,
                options: default_options(),
            };
            store.save()?;
            info!(path = %store.path.display(), "Created option store with defaults");
            return Ok(store);
        }

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                serde_json::from_str::<BTreeMap<String, Value>>(&text).map_err(|e| e.to_string())
            });

        let options = match parsed {
            Ok(raw) => repair_options(raw, &path),
            Err(reason) => {
                warn!(path = %path.display(), reason = %reason, "Unreadable option store, using defaults");
                default_options()
            }
        };

        Ok(Self { path, options })
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every list by key.
    pub fn options(&self) -> &BTreeMap<String, Vec<String>> {
        &self.options
    }

    /// The values of one list.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.options.get(key).map(Vec::as_slice)
    }

    /// Appends `value` to the list `key` and saves.
    ///
    /// Returns `false` without saving when the key is unknown, the value is
    /// blank, or the value is already listed.
    pub fn add(&mut self, key: &str, value: &str) -> PaperworkResult<bool> {
        let value = value.trim();
        let Some(values) = self.options.get_mut(key) else {
            return Ok(false);
        };
        if value.is_empty() || values.iter().any(|v| v == value) {
            return Ok(false);
        }
        values.push(value.to_string());
        self.save()?;
        Ok(true)
    }

    /// Removes `value` from the list `key` and saves.
    ///
    /// Returns `false` without saving when the value is not listed.
    pub fn remove(&mut self, key: &str, value: &str) -> PaperworkResult<bool> {
        let Some(values) = self.options.get_mut(key) else {
            return Ok(false);
        };
        let Some(position) = values.iter().position(|v| v == value) else {
            return Ok(false);
        };
        values.remove(position);
        self.save()?;
        Ok(true)
    }

    /// Restores the default lists and saves.
    pub fn reset(&mut self) -> PaperworkResult<()> {
        self.options = default_options();
        self.save()
    }

    /// Checks that every built-in list is present and non-empty.
    pub fn validate(&self) -> PaperworkResult<()> {
        for key in default_options().keys() {
            match self.options.get(key) {
                None => {
                    return Err(PaperworkError::validation(
                        key.as_str(),
                        format!("필수 키 '{key}'가 없습니다."),
                    ));
                }
                Some(values) if values.is_empty() => {
                    return Err(PaperworkError::validation(
                        key.as_str(),
                        format!("'{key}'에 최소 하나의 값이 있어야 합니다."),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Count and contents of every list.
    pub fn summary(&self) -> BTreeMap<String, OptionSummary> {
        self.options
            .iter()
            .map(|(key, items)| {
                (
                    key.clone(),
                    OptionSummary {
                        count: items.len(),
                        items: items.clone(),
                    },
                )
            })
            .collect()
    }

    fn save(&self) -> PaperworkResult<()> {
        let data_error = |message: String| PaperworkError::DataFileError {
            path: self.path.display().to_string(),
            message,
        };
        let json = serde_json::to_string_pretty(&self.options).map_err(|e| data_error(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| data_error(e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| data_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> OptionStore {
        OptionStore::load(dir.path().join("options.json")).unwrap()
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.path().exists());
        assert_eq!(store.values(PROJECT_MANAGERS).unwrap().len(), 6);
        assert_eq!(store.values(DESTINATIONS).unwrap()[0], "고창");

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("이정석"));
    }

    #[test]
    fn test_missing_keys_are_merged_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"destinations": ["독도"], "vehicles": ["카니발"]}"#).unwrap();

        let store = OptionStore::load(&path).unwrap();

        assert_eq!(store.values(DESTINATIONS).unwrap(), ["독도".to_string()]);
        assert_eq!(store.values(PROJECT_MANAGERS).unwrap().len(), 6);
        assert_eq!(store.values("vehicles").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, "{ not json").unwrap();

        let store = OptionStore::load(&path).unwrap();

        assert_eq!(store.options(), &default_options());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_malformed_list_keeps_valid_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(
            &path,
            r#"{"project_managers": ["홍길동"], "destinations": "broken", "vehicles": [1, 2]}"#,
        )
        .unwrap();

        let store = OptionStore::load(&path).unwrap();

        assert_eq!(store.values(PROJECT_MANAGERS), Some(&["홍길동".to_string()][..]));
        assert_eq!(
            store.values(DESTINATIONS).map(<[String]>::to_vec),
            default_options().remove(DESTINATIONS)
        );
        assert!(store.values("vehicles").is_none());
    }

    #[test]
    fn test_add_and_remove_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(store.add(DESTINATIONS, " 독도 ").unwrap());
        assert!(!store.add(DESTINATIONS, "독도").unwrap());
        assert!(!store.add("unknown", "값").unwrap());
        assert!(!store.add(DESTINATIONS, "   ").unwrap());

        let reloaded = OptionStore::load(store.path()).unwrap();
        assert!(reloaded.values(DESTINATIONS).unwrap().contains(&"독도".to_string()));

        assert!(store.remove(DESTINATIONS, "독도").unwrap());
        assert!(!store.remove(DESTINATIONS, "독도").unwrap());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.remove(PROJECT_MANAGERS, "이정석").unwrap();

        store.reset().unwrap();

        assert_eq!(store.options(), &default_options());
    }

    #[test]
    fn test_validate_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(store.validate().is_ok());
        assert_eq!(store.summary()[DESTINATIONS].count, 17);

        for manager in DEFAULT_PROJECT_MANAGERS {
            store.remove(PROJECT_MANAGERS, manager).unwrap();
        }
        match store.validate() {
            Err(PaperworkError::Validation { field, .. }) => assert_eq!(field, PROJECT_MANAGERS),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
