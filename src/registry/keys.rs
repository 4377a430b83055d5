//! Model directory scanning and file-name keys.
//!
//! A model file's key is its file name up to the first `.`; when that stem
//! contains `_`, the key is the part after the last `_`:
//!
//! | File                | Key    |
//! |---------------------|--------|
//! | `en.json`           | `en`   |
//! | `tokenizer_en.json` | `en`   |
//! | `news.v2.json`      | `news` |
//!
//! Hidden files and sub-directories are ignored. Scans are sorted by file
//! name so the same directory always yields the same keys.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{CapabilityKind, Domain, Language};
use crate::{MimirError, Result};

/// Key of a model file, or `None` for hidden files and files without a stem.
pub fn key_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    let stem = name.split('.').next()?;
    let key = stem.rsplit('_').next()?;
    (!key.is_empty()).then(|| key.to_string())
}

/// Keyed model files of a configured directory.
///
/// A missing, non-directory or empty directory is a configuration error:
/// the caller asked for the capability, so it may not silently vanish.
pub fn scan(dir: &Path, capability: CapabilityKind) -> Result<BTreeMap<String, PathBuf>> {
    if !dir.exists() {
        return Err(MimirError::Configuration(format!(
            "{capability} directory does not exist: {dir:?}"
        )));
    }
    if !dir.is_dir() {
        return Err(MimirError::Configuration(format!(
            "{capability} path is not a directory: {dir:?}"
        )));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| {
            MimirError::Configuration(format!("Failed to read {capability} directory {dir:?}: {e}"))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut keyed = BTreeMap::new();
    for path in files {
        let Some(key) = key_of(&path) else { continue };
        if let Some(previous) = keyed.insert(key.clone(), path.clone()) {
            return Err(MimirError::Configuration(format!(
                "{capability} files {previous:?} and {path:?} both have key '{key}'"
            )));
        }
    }

    if keyed.is_empty() {
        return Err(MimirError::Configuration(format!(
            "{capability} directory has no model files: {dir:?}"
        )));
    }
    Ok(keyed)
}

/// Scan a per-language directory; every key must be an ISO 639-1 code.
pub fn scan_languages(
    dir: &Path,
    capability: CapabilityKind,
) -> Result<BTreeMap<Language, PathBuf>> {
    scan(dir, capability)?
        .into_iter()
        .map(|(key, path)| {
            let language = Language::from_code(&key).ok_or_else(|| {
                MimirError::Configuration(format!(
                    "{capability} file {path:?} has key '{key}', which is not an ISO 639-1 code"
                ))
            })?;
            Ok((language, path))
        })
        .collect()
}

/// Scan a per-domain directory.
pub fn scan_domains(dir: &Path, capability: CapabilityKind) -> Result<BTreeMap<Domain, PathBuf>> {
    Ok(scan(dir, capability)?
        .into_iter()
        .map(|(key, path)| (Domain::new(key), path))
        .collect())
}
