// src/engine/core.rs

//! Pure escalation state machine.
//!
//! `EscalationCore` consumes one [`Classification`] per attempt and decides
//! whether the run converged, which remedy to apply next, or that it is time
//! to give up. It owns:
//! - one ladder cursor per guarded kind,
//! - the option set for the next attempt,
//! - the attempt counter and its hard cap.
//!
//! It has no Tokio types and performs no IO, so every escalation path can be
//! unit tested with hand-built classifications.
//!
//! Option sets: the next attempt runs with the base set, merged with the most
//! recently selected remedy of every kind that has escalated so far. Kinds are
//! merged in the order they last escalated, so the latest remedy wins a name
//! clash, and a remedy for one kind is never dropped because another kind
//! escalated after it.

use tracing::{debug, warn};

use crate::engine::ladder::{GuardedError, RobustRunConfig};
use crate::option::OptionSet;
use crate::status::Classification;
use crate::types::{ErrorKind, FailurePriority};

/// Why an attempt counted as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// A guarded kind matched without its paired success marker.
    Guarded(ErrorKind),
    /// No guarded kind failed, but the normal-exit marker is missing.
    Unclassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUpReason {
    /// The ladder consulted for this failure has no unused step.
    LadderExhausted(ErrorKind),
    /// The failure was unclassified and no ladder is guarded.
    NoRemedy,
    /// The attempt cap was reached.
    AttemptLimit,
}

/// Decision returned after recording one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreDecision {
    /// No genuine failure and a normal exit: stop with success.
    Converged,
    /// Run another attempt with `options`.
    Retry {
        cause: FailureCause,
        /// Kind whose ladder supplied the remedy.
        remedy_kind: ErrorKind,
        /// Index of the remedy within that ladder.
        step: usize,
        options: OptionSet,
    },
    /// Stop with failure.
    GiveUp {
        cause: FailureCause,
        reason: GiveUpReason,
    },
}

#[derive(Debug)]
pub struct EscalationCore {
    guards: Vec<GuardedError>,
    declared: Vec<ErrorKind>,
    cursors: Vec<usize>,
    /// Guard indices that have escalated, least recent first.
    applied: Vec<usize>,
    priority: FailurePriority,
    base: OptionSet,
    current: OptionSet,
    attempts: usize,
    max_attempts: usize,
}

impl EscalationCore {
    pub fn new(config: &RobustRunConfig, base: OptionSet) -> Self {
        Self {
            guards: config.guards.clone(),
            declared: config.guarded_kinds(),
            cursors: vec![0; config.guards.len()],
            applied: Vec::new(),
            priority: config.priority.clone(),
            current: base.clone(),
            base,
            attempts: 0,
            max_attempts: config.max_attempts(),
        }
    }

    /// Attempts recorded so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Options for the next (or most recent) attempt.
    pub fn current_options(&self) -> &OptionSet {
        &self.current
    }

    /// Next unused ladder index for `kind`, if it is guarded.
    pub fn cursor(&self, kind: ErrorKind) -> Option<usize> {
        self.guard_index(kind).map(|idx| self.cursors[idx])
    }

    fn guard_index(&self, kind: ErrorKind) -> Option<usize> {
        self.declared.iter().position(|k| *k == kind)
    }

    /// Record the classification of the attempt that just ran.
    pub fn step(&mut self, classification: &Classification) -> CoreDecision {
        self.attempts += 1;

        let failing = classification.genuine_failures();
        let cause = match self.priority.select(&self.declared, &failing) {
            Some(kind) => FailureCause::Guarded(kind),
            None if !classification.normal_exit => FailureCause::Unclassified,
            None => {
                debug!(attempt = self.attempts, "no genuine failure and normal exit");
                return CoreDecision::Converged;
            }
        };

        if failing.len() > 1 {
            debug!(?failing, ?cause, "several guarded kinds failed; priority picked one");
        }

        // Unclassified rounds borrow the first guarded kind's ladder.
        let guard_idx = match cause {
            FailureCause::Guarded(kind) => self.guard_index(kind),
            FailureCause::Unclassified => {
                if self.guards.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
        };
        let Some(guard_idx) = guard_idx else {
            return CoreDecision::GiveUp {
                cause,
                reason: GiveUpReason::NoRemedy,
            };
        };

        let kind = self.guards[guard_idx].kind;
        let step = self.cursors[guard_idx];
        if step >= self.guards[guard_idx].ladder.len() {
            warn!(%kind, steps = step, ?cause, "escalation ladder exhausted");
            return CoreDecision::GiveUp {
                cause,
                reason: GiveUpReason::LadderExhausted(kind),
            };
        }

        if self.attempts >= self.max_attempts {
            warn!(attempts = self.attempts, "attempt cap reached");
            return CoreDecision::GiveUp {
                cause,
                reason: GiveUpReason::AttemptLimit,
            };
        }

        self.cursors[guard_idx] += 1;
        self.applied.retain(|g| *g != guard_idx);
        self.applied.push(guard_idx);
        self.current = self.rebuild_options();

        CoreDecision::Retry {
            cause,
            remedy_kind: kind,
            step,
            options: self.current.clone(),
        }
    }

    fn rebuild_options(&self) -> OptionSet {
        let mut options = self.base.clone();
        for g in &self.applied {
            let used = self.cursors[*g];
            if let Some(remedy) = self.guards[*g].ladder.step(used - 1) {
                options.merge_in(remedy);
            }
        }
        options
    }
}
