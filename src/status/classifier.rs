// src/status/classifier.rs

//! Status classifier.
//!
//! A failure marker alone does not make a run fail: some programs print a
//! transient non-convergence message and still converge later in the same
//! output. A kind is a *genuine* failure only when its error marker is present
//! and its paired success marker is absent.

use tracing::debug;

use crate::errors::Result;
use crate::status::registry::{self, ProgramStatus};
use crate::types::{ErrorKind, Program, SuccessKind};

/// Classifies output text for one program.
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier {
    table: &'static ProgramStatus,
}

impl StatusClassifier {
    pub fn for_program(program: Program) -> Self {
        Self {
            table: registry::lookup(program),
        }
    }

    pub fn program(&self) -> Program {
        self.table.program
    }

    pub fn table(&self) -> &'static ProgramStatus {
        self.table
    }

    /// Does the output carry the program's normal-exit marker?
    pub fn has_normal_exit_message(&self, output: &str) -> bool {
        self.table.normal_exit().has_match(output)
    }

    pub fn detect_error(&self, kind: ErrorKind, output: &str) -> Result<bool> {
        Ok(self.table.error_pattern(kind)?.has_match(output))
    }

    pub fn detect_success(&self, kind: SuccessKind, output: &str) -> Result<bool> {
        Ok(self.table.success_pattern(kind)?.has_match(output))
    }

    /// `true` only if `error` is present and `success` is not.
    pub fn is_genuine_failure(&self, error: ErrorKind, success: SuccessKind, output: &str) -> Result<bool> {
        if !self.detect_error(error, output)? {
            return Ok(false);
        }
        Ok(!self.detect_success(success, output)?)
    }

    /// Status of a single guarded kind, using its paired success marker.
    ///
    /// A program without a marker for the paired success cannot rescue the
    /// error.
    pub fn kind_status(&self, kind: ErrorKind, output: &str) -> Result<KindStatus> {
        let error_present = self.detect_error(kind, output)?;
        let success = kind.paired_success();
        let rescued = error_present
            && self.table.success_kinds().any(|s| s == success)
            && self.detect_success(success, output)?;
        Ok(KindStatus {
            kind,
            error_present,
            rescued,
        })
    }

    /// Classify an attempt's output against the guarded kinds.
    ///
    /// Absent output (the run never produced its output file) counts as a
    /// missing normal-exit marker with no kind present.
    pub fn classify(&self, guarded: &[ErrorKind], output: Option<&str>) -> Result<Classification> {
        for kind in guarded {
            self.table.ensure_recognises(*kind)?;
        }

        let Some(text) = output else {
            debug!(program = %self.program(), "no output to classify");
            return Ok(Classification {
                output_present: false,
                normal_exit: false,
                kinds: guarded
                    .iter()
                    .map(|k| KindStatus {
                        kind: *k,
                        error_present: false,
                        rescued: false,
                    })
                    .collect(),
            });
        };

        let normal_exit = self.has_normal_exit_message(text);
        let kinds = guarded
            .iter()
            .map(|k| self.kind_status(*k, text))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            program = %self.program(),
            normal_exit,
            ?kinds,
            "classified output"
        );

        Ok(Classification {
            output_present: true,
            normal_exit,
            kinds,
        })
    }
}

/// Per-kind derived booleans for one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStatus {
    pub kind: ErrorKind,
    pub error_present: bool,
    pub rescued: bool,
}

impl KindStatus {
    pub fn is_genuine_failure(&self) -> bool {
        self.error_present && !self.rescued
    }
}

/// Derived status of one attempt's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub output_present: bool,
    pub normal_exit: bool,
    /// One entry per guarded kind, in guard order.
    pub kinds: Vec<KindStatus>,
}

impl Classification {
    /// Guarded kinds that genuinely failed, in guard order.
    pub fn genuine_failures(&self) -> Vec<ErrorKind> {
        self.kinds
            .iter()
            .filter(|s| s.is_genuine_failure())
            .map(|s| s.kind)
            .collect()
    }

    pub fn status_of(&self, kind: ErrorKind) -> Option<&KindStatus> {
        self.kinds.iter().find(|s| s.kind == kind)
    }
}
