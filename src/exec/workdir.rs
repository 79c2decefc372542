// src/exec/workdir.rs

//! Per-attempt working directories.
//!
//! Attempt `n` runs in `<root>/attempt_<nnn>`. If that name is taken (an
//! earlier or concurrent robust run used the same root) a numeric suffix is
//! added, so an attempt never sees files left by another one. Directories
//! are never removed here; failed attempts stay for inspection.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::fs::FileSystem;

/// Upper bound on suffixes tried before giving up.
const MAX_SUFFIX: usize = 1000;

pub fn attempt_dir_name(attempt: usize) -> String {
    format!("attempt_{attempt:03}")
}

/// Create a fresh directory for `attempt` under `root`.
pub fn allocate(fs: &dyn FileSystem, root: &Path, attempt: usize) -> Result<PathBuf> {
    let base = attempt_dir_name(attempt);
    for suffix in 0..MAX_SUFFIX {
        let name = if suffix == 0 {
            base.clone()
        } else {
            format!("{base}_{suffix}")
        };
        let candidate = root.join(name);
        if fs.exists(&candidate) {
            continue;
        }
        match fs.create_fresh_dir(&candidate) {
            Ok(()) => {
                debug!(dir = ?candidate, attempt, "allocated attempt directory");
                return Ok(candidate);
            }
            // Another run sharing this root took the name first.
            Err(e) if fs.exists(&candidate) => {
                debug!(dir = ?candidate, error = %e, "attempt directory taken concurrently");
            }
            Err(e) => {
                return Err(e.context(format!(
                    "allocating working directory for attempt {attempt}"
                )));
            }
        }
    }
    anyhow::bail!(
        "no free working directory for attempt {attempt} under {:?}",
        root
    )
}
