// src/exec/mod.rs

//! Process execution layer.
//!
//! One call to an [`ExecutorBackend`] is one blocking attempt: stage the input
//! into a fresh working directory, run the caller's script there, read the
//! declared output files back. No retries live here.
//!
//! - [`backend`] provides the `ExecutorBackend` trait and the request/response
//!   types the escalation runner talks in. Tests swap in a fake backend.
//! - [`script`] is the production backend, running the script with
//!   `tokio::process::Command`.
//! - [`workdir`] allocates per-attempt directories under a run root.

pub mod backend;
pub mod script;
pub mod workdir;

pub use backend::{ExecOutputs, ExecRequest, ExecutorBackend, ScriptExit};
pub use script::ScriptExecutor;
