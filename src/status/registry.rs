// src/status/registry.rs

//! Program registry: per-program status markers and option allow-lists.
//!
//! Every [`Program`] has exactly one table, built on first use. A program only
//! lists the error kinds it can actually report; asking about any other kind
//! is an [`QcRunError::UnsupportedKind`] error rather than a silent `false`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::errors::{QcRunError, Result};
use crate::option::OptionName;
use crate::status::pattern::{escape, lines_of, one_of_these, Pattern, EXPONENTIAL_FLOAT_D, LINE_FILL, NEWLINE};
use crate::types::{ErrorKind, Program, SuccessKind};

/// Status table for a single program.
#[derive(Debug)]
pub struct ProgramStatus {
    pub program: Program,
    normal_exit: Pattern,
    errors: Vec<(ErrorKind, Pattern)>,
    successes: Vec<(SuccessKind, Pattern)>,
    options: &'static [OptionName],
}

impl ProgramStatus {
    pub fn normal_exit(&self) -> &Pattern {
        &self.normal_exit
    }

    /// Error kinds this program can exhibit, in table order.
    pub fn error_kinds(&self) -> impl Iterator<Item = ErrorKind> + '_ {
        self.errors.iter().map(|(k, _)| *k)
    }

    pub fn success_kinds(&self) -> impl Iterator<Item = SuccessKind> + '_ {
        self.successes.iter().map(|(k, _)| *k)
    }

    pub fn recognises(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|(k, _)| *k == kind)
    }

    pub fn error_pattern(&self, kind: ErrorKind) -> Result<&Pattern> {
        self.errors
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, p)| p)
            .ok_or(QcRunError::UnsupportedKind {
                program: self.program,
                kind,
            })
    }

    pub fn success_pattern(&self, kind: SuccessKind) -> Result<&Pattern> {
        self.successes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, p)| p)
            .ok_or_else(|| {
                QcRunError::ConfigError(format!(
                    "{} has no '{}' success marker",
                    self.program, kind
                ))
            })
    }

    pub fn allowed_options(&self) -> &'static [OptionName] {
        self.options
    }

    pub fn allows_option(&self, name: OptionName) -> bool {
        self.options.contains(&name)
    }

    /// Fail with [`QcRunError::UnsupportedKind`] unless `kind` is declared.
    pub fn ensure_recognises(&self, kind: ErrorKind) -> Result<()> {
        self.error_pattern(kind).map(|_| ())
    }
}

static REGISTRY: LazyLock<BTreeMap<Program, ProgramStatus>> = LazyLock::new(|| {
    Program::ALL
        .into_iter()
        .map(|p| (p, build_table(p).expect("built-in status patterns compile")))
        .collect()
});

/// Look up the status table for `program`.
pub fn lookup(program: Program) -> &'static ProgramStatus {
    &REGISTRY[&program]
}

const GAUSSIAN_OPTIONS: &[OptionName] = &[
    OptionName::ScfMaxiter,
    OptionName::ScfDiis,
    OptionName::ScfGuess,
    OptionName::OptMaxiter,
    OptionName::OptCoord,
    OptionName::IrcMaxiter,
];

const PSI4_OPTIONS: &[OptionName] = &[
    OptionName::ScfMaxiter,
    OptionName::ScfDiis,
    OptionName::ScfGuess,
    OptionName::OptMaxiter,
    OptionName::OptCoord,
];

const ORCA4_OPTIONS: &[OptionName] = &[
    OptionName::ScfMaxiter,
    OptionName::ScfGuess,
    OptionName::OptMaxiter,
    OptionName::OptCoord,
];

const MOLPRO_OPTIONS: &[OptionName] = &[OptionName::ScfMaxiter, OptionName::ScfGuess, OptionName::OptMaxiter];

const NWCHEM6_OPTIONS: &[OptionName] = &[OptionName::ScfMaxiter, OptionName::OptMaxiter];

fn build_table(program: Program) -> Result<ProgramStatus> {
    match program {
        Program::Gaussian09 => gaussian(program, "Normal termination of Gaussian 09"),
        Program::Gaussian16 => gaussian(program, "Normal termination of Gaussian 16"),
        Program::Psi4 => Ok(ProgramStatus {
            program,
            normal_exit: Pattern::literal("Psi4 exiting successfully")?,
            errors: vec![
                (
                    ErrorKind::ScfNoconv,
                    Pattern::literal("Could not converge SCF iterations in")?,
                ),
                (
                    ErrorKind::OptNoconv,
                    Pattern::literal("Could not converge geometry optimization in")?,
                ),
            ],
            successes: vec![
                (
                    SuccessKind::ScfConv,
                    Pattern::literal("Energy and wave function converged")?,
                ),
                (
                    SuccessKind::OptConv,
                    Pattern::literal("**** Optimization is complete!")?,
                ),
            ],
            options: PSI4_OPTIONS,
        }),
        Program::Orca4 => Ok(ProgramStatus {
            program,
            normal_exit: Pattern::literal("****ORCA TERMINATED NORMALLY****")?,
            errors: vec![
                (ErrorKind::ScfNoconv, Pattern::literal("SCF NOT CONVERGED AFTER")?),
                (
                    ErrorKind::OptNoconv,
                    Pattern::literal("The optimization did not converge but reached the maximum number of optimization cycles")?,
                ),
            ],
            successes: vec![
                (SuccessKind::ScfConv, Pattern::literal("SCF CONVERGED AFTER")?),
                (SuccessKind::OptConv, Pattern::literal("THE OPTIMIZATION HAS CONVERGED")?),
            ],
            options: ORCA4_OPTIONS,
        }),
        Program::Molpro2015 => Ok(ProgramStatus {
            program,
            normal_exit: Pattern::literal("Variable memory released")?,
            errors: vec![(
                ErrorKind::ScfNoconv,
                Pattern::literal("No convergence in max. number of iterations")?,
            )],
            // "Final occupancy:" also follows a non-converged RHF, so it cannot
            // rescue; Molpro errors are always genuine.
            successes: Vec::new(),
            options: MOLPRO_OPTIONS,
        }),
        Program::Nwchem6 => Ok(ProgramStatus {
            program,
            normal_exit: Pattern::literal("Total times cpu:")?,
            errors: vec![
                (ErrorKind::ScfNoconv, Pattern::literal("Calculation failed to converge")?),
                (ErrorKind::OptNoconv, Pattern::literal("Optimization failed")?),
            ],
            // The energy summary is printed whether or not the SCF converged,
            // and a failed optimization aborts the task, so nothing rescues.
            successes: Vec::new(),
            options: NWCHEM6_OPTIONS,
        }),
    }
}

fn gaussian(program: Program, exit_marker: &str) -> Result<ProgramStatus> {
    let scf_rescue_after_increase = format!(
        "{}{ws}{float}{ws}{}{fill}{nl}{fill}{}",
        escape("Initial convergence to"),
        escape("achieved.  Increase integral accuracy."),
        escape("SCF Done:"),
        ws = r"\s+",
        float = EXPONENTIAL_FLOAT_D,
        fill = LINE_FILL,
        nl = NEWLINE,
    );
    let scf_success = one_of_these(&[
        scf_rescue_after_increase,
        escape("Rotation gradient small -- convergence achieved."),
    ]);
    let opt_success = format!(
        "{}{fill}{nl}{fill}{}",
        escape("Optimization completed."),
        escape("-- Stationary point found."),
        fill = LINE_FILL,
        nl = NEWLINE,
    );

    Ok(ProgramStatus {
        program,
        normal_exit: Pattern::literal(exit_marker)?,
        errors: vec![
            (
                ErrorKind::ScfNoconv,
                Pattern::new(&lines_of(&["Convergence criterion not met.", "SCF Done:"]))?,
            ),
            (
                ErrorKind::OptNoconv,
                Pattern::new(&lines_of(&["Optimization stopped.", "-- Number of steps exceeded,"]))?,
            ),
            (
                ErrorKind::IrcNoconv,
                Pattern::literal("Maximum number of corrector steps exceeded")?,
            ),
        ],
        successes: vec![
            (SuccessKind::ScfConv, Pattern::new(&scf_success)?),
            (SuccessKind::OptConv, Pattern::new(&opt_success)?),
            (
                SuccessKind::IrcConv,
                Pattern::literal("Reaction path calculation complete.")?,
            ),
        ],
        options: GAUSSIAN_OPTIONS,
    })
}
