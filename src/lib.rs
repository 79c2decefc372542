// src/lib.rs

//! Robust execution of quantum-chemistry jobs.
//!
//! A job is rendered to program input, run through a shell script, and its
//! output classified against the error kinds the caller guards against. A
//! genuine failure triggers the next remedy on that kind's escalation ladder
//! until the job converges or the remedies run out.

pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fingerprint;
pub mod fs;
pub mod job;
pub mod logging;
pub mod option;
pub mod reader;
pub mod status;
pub mod types;
pub mod writer;

use std::path::Path;

use tracing::info;

pub use crate::config::JobFile;
pub use crate::engine::{
    EscalationLadder, GuardedError, RobustRunConfig, RunReport, RunStatus, robust_run,
};
pub use crate::errors::{QcRunError, Result};
pub use crate::job::{Geometry, JobKind, JobSpec};
pub use crate::option::{JobOption, OptionName, OptionSet, OptionValue};
pub use crate::types::{ErrorKind, FailurePriority, Program, SuccessKind};
pub use crate::writer::{GaussianWriter, InputWriter};

use crate::config::load_and_validate;
use crate::exec::ScriptExecutor;

/// Load the job file at `path` and run it with the real script executor.
pub async fn run_job_file<W>(path: impl AsRef<Path>, writer: &W) -> Result<RunReport>
where
    W: InputWriter + ?Sized,
{
    let path = path.as_ref();
    let JobFile { job, run } = load_and_validate(path)?;
    info!(
        file = %path.display(),
        program = %job.program,
        root = %run.run_root.display(),
        "loaded job file"
    );

    let mut executor = ScriptExecutor::new();
    robust_run(&job, run, writer, &mut executor).await
}
