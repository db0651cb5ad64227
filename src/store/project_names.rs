//! Project names offered on the forms.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{PaperworkError, PaperworkResult};

/// Reads project names from the first column of a CSV file with a header.
///
/// Blank cells are dropped. A missing file yields an empty list and a
/// warning, since the forms still accept a typed-in project name.
pub fn load_project_names<P: AsRef<Path>>(path: P) -> PaperworkResult<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "Project name list not found");
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| PaperworkError::DataFileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PaperworkError::DataFileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(name) = record.get(0).filter(|name| !name.is_empty()) {
            names.push(name.to_string());
        }
    }

    debug!(path = %path.display(), count = names.len(), "Loaded project names");
    Ok(names)
}
