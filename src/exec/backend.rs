// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The escalation runner talks to an `ExecutorBackend` instead of spawning
//! processes itself. Production code uses [`super::ScriptExecutor`]; tests
//! provide a backend that returns canned output per attempt.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use crate::errors::Result;

/// Everything needed to run one attempt.
#[derive(Debug, Clone)]
pub struct ExecRequest {
    /// Opaque command sequence supplied by the caller.
    pub script: String,
    /// Root under which the attempt directory is allocated.
    pub run_root: PathBuf,
    /// 0-based attempt index within the robust run.
    pub attempt: usize,
    pub input_name: String,
    pub input_text: String,
    /// Extra `(file name, contents)` pairs written next to the input.
    pub aux_files: Vec<(String, String)>,
    /// Files read back after the script finishes; the first is classified.
    pub output_names: Vec<String>,
    pub timeout: Option<Duration>,
}

/// How the script process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptExit {
    /// Exited on its own with this code (`-1` if killed by a signal).
    Exited(i32),
    /// Killed after the configured timeout elapsed.
    TimedOut,
    /// Nothing was run (fake backends).
    NotRun,
}

/// Result of one attempt.
#[derive(Debug, Clone)]
pub struct ExecOutputs {
    /// Directory the attempt ran in, if one was created.
    pub work_dir: Option<PathBuf>,
    /// One slot per requested output name; `None` when the file is missing.
    pub outputs: Vec<Option<String>>,
    pub exit: ScriptExit,
}

impl ExecOutputs {
    /// Contents of the first declared output file.
    pub fn primary(&self) -> Option<&str> {
        self.outputs.first().and_then(|o| o.as_deref())
    }
}

/// Trait abstracting how a single attempt is executed.
pub trait ExecutorBackend: Send {
    /// Run one attempt to completion.
    ///
    /// Missing output files are not errors; only failures to stage the
    /// attempt or to spawn the script are.
    fn execute(
        &mut self,
        request: ExecRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecOutputs>> + Send + '_>>;
}
