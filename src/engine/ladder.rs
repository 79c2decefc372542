// src/engine/ladder.rs

//! Escalation ladders and the per-run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::option::OptionSet;
use crate::types::{ErrorKind, FailurePriority};

/// Ordered remedies for one error kind; index 0 is tried first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EscalationLadder {
    steps: Vec<OptionSet>,
}

impl EscalationLadder {
    pub fn new(steps: Vec<OptionSet>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, idx: usize) -> Option<&OptionSet> {
        self.steps.get(idx)
    }

    pub fn steps(&self) -> &[OptionSet] {
        &self.steps
    }
}

impl FromIterator<OptionSet> for EscalationLadder {
    fn from_iter<I: IntoIterator<Item = OptionSet>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An error kind to guard against, with its remedies.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardedError {
    pub kind: ErrorKind,
    pub ladder: EscalationLadder,
}

impl GuardedError {
    pub fn new(kind: ErrorKind, ladder: EscalationLadder) -> Self {
        Self { kind, ladder }
    }
}

/// Everything about a robust run except the job itself.
///
/// Passed by value into [`super::robust_run`]; there are no process-wide
/// defaults a concurrent run could observe.
#[derive(Debug, Clone)]
pub struct RobustRunConfig {
    /// Execution script. `None` means generation-only: render the input and
    /// return it without running anything.
    pub script: Option<String>,
    /// Attempt directories are created under this root.
    pub run_root: PathBuf,
    pub input_name: String,
    pub output_names: Vec<String>,
    pub aux_files: Vec<(String, String)>,
    /// Guarded kinds in declaration order.
    pub guards: Vec<GuardedError>,
    pub priority: FailurePriority,
    pub timeout: Option<Duration>,
}

impl RobustRunConfig {
    pub fn new(run_root: impl Into<PathBuf>) -> Self {
        Self {
            script: None,
            run_root: run_root.into(),
            input_name: "run.inp".to_string(),
            output_names: vec!["run.out".to_string()],
            aux_files: Vec::new(),
            guards: Vec::new(),
            priority: FailurePriority::Declared,
            timeout: None,
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn guard(mut self, kind: ErrorKind, ladder: EscalationLadder) -> Self {
        self.guards.push(GuardedError::new(kind, ladder));
        self
    }

    pub fn with_priority(mut self, priority: FailurePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn guarded_kinds(&self) -> Vec<ErrorKind> {
        self.guards.iter().map(|g| g.kind).collect()
    }

    /// Hard cap on attempts: one initial attempt plus every ladder step.
    pub fn max_attempts(&self) -> usize {
        1 + self.guards.iter().map(|g| g.ladder.len()).sum::<usize>()
    }
}
