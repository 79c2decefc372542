// src/config/mod.rs

//! Job files.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a job file from disk (`loader.rs`).
//! - Validate it against the program's status and option tables
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{from_toml_str, load_and_validate, load_from_path};
pub use model::{GuardSection, JobFile, JobSection, PriorityMode, RawJobFile, RunSection};
