// src/reader.rs

//! Output readers.
//!
//! Readers turn a converged output into domain values. The escalation engine
//! never calls them; they are for whoever consumes a [`crate::RunReport`].

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{QcRunError, Result};
use crate::status::pattern::EXPONENTIAL_FLOAT_D;
use crate::types::Program;

/// Maps program output text to a domain value.
pub trait OutputReader {
    type Value;

    fn read(&self, program: Program, method: &str, output: &str) -> Result<Self::Value>;
}

static GAUSSIAN_SCF_DONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"SCF Done:\s+E\([^)]*\)\s*=\s*({EXPONENTIAL_FLOAT_D})"))
        .expect("static energy regex compiles")
});

static PSI4_TOTAL_ENERGY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"Total Energy\s*=\s*({EXPONENTIAL_FLOAT_D})"))
        .expect("static energy regex compiles")
});

static ORCA_FINAL_ENERGY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"FINAL SINGLE POINT ENERGY\s+({EXPONENTIAL_FLOAT_D})"))
        .expect("static energy regex compiles")
});

/// Reads the final SCF energy (hartree).
///
/// The last occurrence wins, so optimizations yield the energy at the final
/// geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyReader;

impl OutputReader for EnergyReader {
    type Value = f64;

    fn read(&self, program: Program, method: &str, output: &str) -> Result<f64> {
        let re: &Regex = match program {
            Program::Gaussian09 | Program::Gaussian16 => &GAUSSIAN_SCF_DONE_RE,
            Program::Psi4 => &PSI4_TOTAL_ENERGY_RE,
            Program::Orca4 => &ORCA_FINAL_ENERGY_RE,
            other => {
                return Err(QcRunError::ConfigError(format!(
                    "no energy reader for {other}"
                )));
            }
        };

        let raw = re
            .captures_iter(output)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                QcRunError::Other(anyhow::anyhow!(
                    "no {method} energy found in {program} output"
                ))
            })?;

        parse_fortran_float(raw)
    }
}

/// Parse a float that may use a Fortran `D` exponent.
pub fn parse_fortran_float(raw: &str) -> Result<f64> {
    raw.replace(['D', 'd'], "E")
        .parse()
        .map_err(|e| QcRunError::Other(anyhow::anyhow!("bad float '{raw}': {e}")))
}
