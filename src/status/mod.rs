// src/status/mod.rs

//! Output status classification.
//!
//! - [`pattern`] builds whitespace- and case-tolerant regexes from literal
//!   marker text.
//! - [`registry`] holds the per-program table of exit, error and success
//!   markers plus the option allow-list.
//! - [`classifier`] answers "did this error occur, and was it rescued?" for a
//!   given output text.

pub mod classifier;
pub mod pattern;
pub mod registry;

pub use classifier::{Classification, KindStatus, StatusClassifier};
pub use registry::ProgramStatus;
