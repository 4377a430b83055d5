//! Reading model files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{MimirError, Result};

/// Deserialize a JSON model file.
///
/// Any failure is a configuration error naming the file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|e| {
        MimirError::Configuration(format!("Failed to parse model file {path:?}: {e}"))
    })
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        MimirError::Configuration(format!("Failed to read model file {path:?}: {e}"))
    })
}
