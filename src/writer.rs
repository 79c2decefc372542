// src/writer.rs

//! Input writers.
//!
//! The engine only needs "job parameters in, input text out". Any writer must
//! reject a job whose geometry is invalid ([`QcRunError::InvalidGeometry`]) or
//! which carries an option the program does not allow
//! ([`QcRunError::UnknownOption`]); [`validate_job`] does both checks.

use std::fmt::Write as _;

use crate::errors::{QcRunError, Result};
use crate::job::{Geometry, JobKind, JobSpec};
use crate::option::{OptionName, OptionValue};
use crate::status::registry;
use crate::types::Program;

/// Maps job parameters to program input text.
pub trait InputWriter: Send + Sync {
    fn write(&self, job: &JobSpec) -> Result<String>;
}

impl<F> InputWriter for F
where
    F: Fn(&JobSpec) -> Result<String> + Send + Sync,
{
    fn write(&self, job: &JobSpec) -> Result<String> {
        self(job)
    }
}

/// Check geometry, option allow-list and frozen coordinates.
pub fn validate_job(job: &JobSpec) -> Result<()> {
    job.geometry.validate()?;

    let table = registry::lookup(job.program);
    for option in job.options.iter() {
        if !table.allows_option(option.name) {
            return Err(QcRunError::UnknownOption {
                program: job.program,
                option: option.name.to_string(),
            });
        }
    }

    if !job.frozen_coordinates.is_empty() {
        let names = job.geometry.coordinate_names();
        for frozen in &job.frozen_coordinates {
            if !names.contains(&frozen.as_str()) {
                return Err(QcRunError::InvalidGeometry(format!(
                    "frozen coordinate '{frozen}' is not a Z-matrix coordinate"
                )));
            }
        }
    }

    Ok(())
}

/// Writer for Gaussian 09 / 16 input decks.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianWriter;

impl InputWriter for GaussianWriter {
    fn write(&self, job: &JobSpec) -> Result<String> {
        if !matches!(job.program, Program::Gaussian09 | Program::Gaussian16) {
            return Err(QcRunError::ConfigError(format!(
                "the Gaussian writer cannot write input for {}",
                job.program
            )));
        }
        validate_job(job)?;

        let mut route = format!("# {}/{}", job.method, job.basis);
        let job_keyword = job_keyword(job)?;
        if !job_keyword.is_empty() {
            route.push(' ');
            route.push_str(&job_keyword);
        }

        let mut scf = Vec::new();
        if let Some(v) = job.options.get(OptionName::ScfMaxiter) {
            scf.push(format!("maxcycle={}", int_value(OptionName::ScfMaxiter, v)?));
        }
        if let Some(v) = job.options.get(OptionName::ScfDiis) {
            if !bool_value(OptionName::ScfDiis, v)? {
                scf.push("nodiis".to_string());
            }
        }
        let guess = match job.options.get(OptionName::ScfGuess) {
            Some(v) => Some(text_value(OptionName::ScfGuess, v)?.to_lowercase()),
            None => None,
        };
        if !scf.is_empty() {
            let _ = write!(route, " scf=({})", scf.join(","));
        }
        if let Some(guess) = guess {
            let _ = write!(route, " guess={guess}");
        }

        let comment = if job.comment.is_empty() {
            "qcrun job".to_string()
        } else {
            job.comment.clone()
        };

        let mut out = String::new();
        out.push_str(&route);
        out.push_str("\n\n");
        out.push_str(&comment);
        out.push_str("\n\n");
        let _ = writeln!(out, "{} {}", job.charge, job.mult);
        write_geometry(&mut out, job);
        out.push('\n');
        Ok(out)
    }
}

fn job_keyword(job: &JobSpec) -> Result<String> {
    let keyword = match job.kind {
        JobKind::Energy => String::new(),
        JobKind::Gradient => "force".to_string(),
        JobKind::Hessian => "freq".to_string(),
        JobKind::Optimization => {
            let mut opts = Vec::new();
            if job.saddle {
                opts.extend(["ts", "calcfc", "noeigentest"].map(str::to_string));
            }
            if let Some(v) = job.options.get(OptionName::OptMaxiter) {
                opts.push(format!("maxcycles={}", int_value(OptionName::OptMaxiter, v)?));
            }
            if let Some(v) = job.options.get(OptionName::OptCoord) {
                let coord = text_value(OptionName::OptCoord, v)?.to_lowercase();
                opts.push(match coord.as_str() {
                    "zmatrix" | "z-matrix" => "z-matrix".to_string(),
                    other => other.to_string(),
                });
            }
            if opts.is_empty() {
                "opt".to_string()
            } else {
                format!("opt=({})", opts.join(","))
            }
        }
        JobKind::Irc => match job.options.get(OptionName::IrcMaxiter) {
            Some(v) => format!("irc=(maxpoints={})", int_value(OptionName::IrcMaxiter, v)?),
            None => "irc".to_string(),
        },
    };
    Ok(keyword)
}

fn write_geometry(out: &mut String, job: &JobSpec) {
    match &job.geometry {
        Geometry::Cartesian(atoms) => {
            for atom in atoms {
                let _ = writeln!(
                    out,
                    "{}  {:.8}  {:.8}  {:.8}",
                    atom.symbol, atom.xyz[0], atom.xyz[1], atom.xyz[2]
                );
            }
        }
        Geometry::ZMatrix { rows, values } => {
            for row in rows {
                let mut line = row.symbol.clone();
                for (r, name) in row.refs.iter().zip(&row.names) {
                    let _ = write!(line, "  {}  {}", r + 1, name);
                }
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
            let (frozen, free): (Vec<_>, Vec<_>) = values
                .iter()
                .partition(|(name, _)| job.frozen_coordinates.contains(*name));
            for (name, value) in free {
                let _ = writeln!(out, "{name}={value:.8}");
            }
            if !frozen.is_empty() {
                out.push('\n');
                for (name, value) in frozen {
                    let _ = writeln!(out, "{name}={value:.8}");
                }
            }
        }
    }
}

fn int_value(name: OptionName, value: &OptionValue) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| QcRunError::ConfigError(format!("option '{name}' expects an integer, got '{value}'")))
}

fn bool_value(name: OptionName, value: &OptionValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| QcRunError::ConfigError(format!("option '{name}' expects true/false, got '{value}'")))
}

fn text_value<'a>(name: OptionName, value: &'a OptionValue) -> Result<&'a str> {
    value
        .as_text()
        .ok_or_else(|| QcRunError::ConfigError(format!("option '{name}' expects a word, got '{value}'")))
}
