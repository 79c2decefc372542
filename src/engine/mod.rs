// src/engine/mod.rs

//! Escalation engine.
//!
//! One *robust run* is a strictly sequential series of attempts for a single
//! job. Each attempt renders the input, executes it, classifies the output,
//! and either stops or picks the next remedy from the ladder of the kind that
//! failed.
//!
//! The pure state machine (ladder cursors, option merging, attempt cap) lives
//! in [`core`]; the async shell that drives the writer, executor and
//! classifier is [`runner`]. All state belongs to one call of
//! [`robust_run`]; nothing is shared between concurrent runs.

pub mod core;
pub mod ladder;
pub mod report;
pub mod runner;

pub use core::{CoreDecision, EscalationCore, FailureCause, GiveUpReason};
pub use ladder::{EscalationLadder, GuardedError, RobustRunConfig};
pub use report::{AttemptRecord, RunReport, RunStatus};
pub use runner::robust_run;
