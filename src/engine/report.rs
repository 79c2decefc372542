// src/engine/report.rs

use std::path::PathBuf;

use crate::engine::core::FailureCause;
use crate::errors::{QcRunError, Result};
use crate::exec::ScriptExit;
use crate::option::OptionSet;
use crate::status::Classification;
use crate::types::ErrorKind;

/// Terminal state of a robust run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The last attempt exited normally with no genuine guarded failure.
    Converged,
    /// No execution script: the input was rendered and nothing was run.
    GenerationOnly,
    /// Every remedy for `kind` was tried without clearing it.
    LadderExhausted { kind: ErrorKind },
    /// The run never reached a classifiable stage and no remedy is left.
    Unclassified,
}

/// What happened in one attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub index: usize,
    pub work_dir: Option<PathBuf>,
    pub options: OptionSet,
    /// blake3 digest of the rendered input plus auxiliary files.
    pub input_digest: String,
    pub exit: ScriptExit,
    pub classification: Classification,
    /// `None` when the attempt converged.
    pub failure: Option<FailureCause>,
}

/// Outcome of [`super::robust_run`].
///
/// Failed runs keep the last output text so it can be inspected.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    /// Input text of the last attempt (the only one in generation-only mode).
    pub input: String,
    /// Primary output text of the last attempt.
    pub output: Option<String>,
    /// Every output slot of the last attempt, in declared order.
    pub outputs: Vec<Option<String>>,
    /// Options the last attempt ran with.
    pub options: OptionSet,
    pub attempts: Vec<AttemptRecord>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, RunStatus::Converged | RunStatus::GenerationOnly)
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Turn a failed report into the matching error, carrying the output.
    pub fn into_result(self) -> Result<RunReport> {
        let attempts = self.attempts.len();
        match self.status {
            RunStatus::Converged | RunStatus::GenerationOnly => Ok(self),
            RunStatus::LadderExhausted { kind } => Err(QcRunError::LadderExhausted {
                kind,
                attempts,
                output: self.output,
            }),
            RunStatus::Unclassified => Err(QcRunError::Unclassified {
                attempts,
                output: self.output,
            }),
        }
    }
}
