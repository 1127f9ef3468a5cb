//! Dataset loading
//!
//! Reads the country dataset once at startup. Bad data fails the load with
//! a descriptive error rather than being skipped at query time.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use super::country::Country;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset '{path}' is not valid: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset '{path}' contains duplicate country name '{name}'")]
    DuplicateName { path: String, name: String },
}

/// Load and validate the dataset file.
///
/// Enforces the case-insensitive name uniqueness invariant up front and
/// returns the collection sorted by name, matching the store's post-insert
/// ordering.
pub fn load_from(path: &Path) -> Result<Vec<Country>, DatasetError> {
    let display = path.display().to_string();

    let raw = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: display.clone(),
        source,
    })?;

    let mut countries: Vec<Country> =
        serde_json::from_slice(&raw).map_err(|source| DatasetError::Parse {
            path: display.clone(),
            source,
        })?;

    let mut seen = HashSet::new();
    for country in &countries {
        if !seen.insert(country.name.to_lowercase()) {
            return Err(DatasetError::DuplicateName {
                path: display,
                name: country.name.clone(),
            });
        }
    }

    countries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(countries)
}
