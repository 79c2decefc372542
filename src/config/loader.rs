// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{JobFile, RawJobFile};
use crate::errors::Result;

/// Read a job file and return the raw `RawJobFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for the
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawJobFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    from_toml_str(&contents)
}

/// Deserialize a job file from TOML text.
pub fn from_toml_str(contents: &str) -> Result<RawJobFile> {
    let raw: RawJobFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a job file from `path` and validate it.
///
/// A relative `[run].root` is resolved against the directory holding the
/// job file, so runs land next to their job regardless of the caller's cwd.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<JobFile> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let mut file = JobFile::try_from(raw)?;

    if file.run.run_root.is_relative() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            file.run.run_root = parent.join(&file.run.run_root);
        }
    }

    Ok(file)
}
