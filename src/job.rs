// src/job.rs

//! Job parameters: geometry, job kind and the per-attempt [`JobSpec`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::errors::{QcRunError, Result};
use crate::option::OptionSet;
use crate::types::Program;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub xyz: [f64; 3],
}

/// One Z-matrix row: atom symbol plus up to three (reference, coordinate
/// name) pairs. References are 0-based indices of earlier rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ZRow {
    pub symbol: String,
    pub refs: Vec<usize>,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Cartesian(Vec<Atom>),
    ZMatrix {
        rows: Vec<ZRow>,
        values: BTreeMap<String, f64>,
    },
}

impl Geometry {
    /// Parse a geometry block.
    ///
    /// Cartesian blocks are `symbol x y z` lines. Z-matrix blocks are rows
    /// like `H 1 R1 2 A2` (1-based references), a blank line, then
    /// `name = value` (or `name value`) lines.
    pub fn parse(text: &str) -> Result<Geometry> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let body: Vec<&str> = lines.iter().copied().filter(|l| !l.is_empty()).collect();
        if body.is_empty() {
            return Err(QcRunError::InvalidGeometry("empty geometry".to_string()));
        }

        if let Some(atoms) = parse_cartesian(&body) {
            return Ok(Geometry::Cartesian(atoms));
        }

        let geo = parse_zmatrix(&lines)?;
        geo.validate()?;
        Ok(geo)
    }

    pub fn natoms(&self) -> usize {
        match self {
            Geometry::Cartesian(atoms) => atoms.len(),
            Geometry::ZMatrix { rows, .. } => rows.len(),
        }
    }

    pub fn is_zmatrix(&self) -> bool {
        matches!(self, Geometry::ZMatrix { .. })
    }

    /// Check structural validity of an already-built geometry.
    pub fn validate(&self) -> Result<()> {
        match self {
            Geometry::Cartesian(atoms) => {
                if atoms.is_empty() {
                    return Err(QcRunError::InvalidGeometry("no atoms".to_string()));
                }
                for atom in atoms {
                    if !is_symbol(&atom.symbol) || atom.xyz.iter().any(|c| !c.is_finite()) {
                        return Err(QcRunError::InvalidGeometry(format!(
                            "bad Cartesian atom {:?}",
                            atom
                        )));
                    }
                }
                Ok(())
            }
            Geometry::ZMatrix { rows, values } => {
                if rows.is_empty() {
                    return Err(QcRunError::InvalidGeometry("no Z-matrix rows".to_string()));
                }
                for (idx, row) in rows.iter().enumerate() {
                    if !is_symbol(&row.symbol) {
                        return Err(QcRunError::InvalidGeometry(format!(
                            "bad symbol '{}' in Z-matrix row {}",
                            row.symbol,
                            idx + 1
                        )));
                    }
                    if row.refs.len() != idx.min(3) || row.names.len() != row.refs.len() {
                        return Err(QcRunError::InvalidGeometry(format!(
                            "Z-matrix row {} needs {} reference(s)",
                            idx + 1,
                            idx.min(3)
                        )));
                    }
                    for (pos, r) in row.refs.iter().enumerate() {
                        if *r >= idx || row.refs[..pos].contains(r) {
                            return Err(QcRunError::InvalidGeometry(format!(
                                "Z-matrix row {} has invalid reference {}",
                                idx + 1,
                                r + 1
                            )));
                        }
                    }
                    for name in &row.names {
                        if !values.contains_key(name) {
                            return Err(QcRunError::InvalidGeometry(format!(
                                "Z-matrix coordinate '{}' has no value",
                                name
                            )));
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Coordinate names defined by a Z-matrix (empty for Cartesian).
    pub fn coordinate_names(&self) -> Vec<&str> {
        match self {
            Geometry::Cartesian(_) => Vec::new(),
            Geometry::ZMatrix { values, .. } => values.keys().map(String::as_str).collect(),
        }
    }
}

fn is_symbol(s: &str) -> bool {
    !s.is_empty() && s.len() <= 3 && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_cartesian(body: &[&str]) -> Option<Vec<Atom>> {
    let mut atoms = Vec::with_capacity(body.len());
    for line in body {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 || !is_symbol(fields[0]) {
            return None;
        }
        let mut xyz = [0.0; 3];
        for (slot, field) in xyz.iter_mut().zip(&fields[1..]) {
            *slot = field.parse().ok()?;
        }
        atoms.push(Atom {
            symbol: fields[0].to_string(),
            xyz,
        });
    }
    Some(atoms)
}

fn parse_zmatrix(lines: &[&str]) -> Result<Geometry> {
    let mut rows = Vec::new();
    let mut values = BTreeMap::new();
    let mut in_values = false;

    for line in lines {
        if line.is_empty() {
            if !rows.is_empty() {
                in_values = true;
            }
            continue;
        }
        if in_values {
            let (name, value) = match line.split_once('=') {
                Some((n, v)) => (n.trim(), v.trim()),
                None => line.split_once(char::is_whitespace).map(|(n, v)| (n.trim(), v.trim())).ok_or_else(
                    || QcRunError::InvalidGeometry(format!("cannot read Z-matrix value line '{line}'")),
                )?,
            };
            let value: f64 = value.parse().map_err(|_| {
                QcRunError::InvalidGeometry(format!("non-numeric value for '{name}': '{value}'"))
            })?;
            values.insert(name.to_string(), value);
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() % 2 == 0 {
            return Err(QcRunError::InvalidGeometry(format!(
                "neither a Cartesian nor a Z-matrix line: '{line}'"
            )));
        }
        let mut refs = Vec::new();
        let mut names = Vec::new();
        for pair in fields[1..].chunks(2) {
            let one_based: usize = pair[0].parse().map_err(|_| {
                QcRunError::InvalidGeometry(format!("bad Z-matrix reference '{}'", pair[0]))
            })?;
            if one_based == 0 {
                return Err(QcRunError::InvalidGeometry(
                    "Z-matrix references are 1-based".to_string(),
                ));
            }
            refs.push(one_based - 1);
            names.push(pair[1].to_string());
        }
        rows.push(ZRow {
            symbol: fields[0].to_string(),
            refs,
            names,
        });
    }

    Ok(Geometry::ZMatrix { rows, values })
}

/// What the input deck asks the program to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    #[default]
    Energy,
    Gradient,
    Hessian,
    Optimization,
    Irc,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobKind::Energy => "energy",
            JobKind::Gradient => "gradient",
            JobKind::Hessian => "hessian",
            JobKind::Optimization => "optimization",
            JobKind::Irc => "irc",
        };
        f.write_str(s)
    }
}

/// Everything an input writer needs for one attempt.
///
/// A spec is never mutated between attempts: the runner clones the caller's
/// spec and swaps in the attempt's options with [`JobSpec::with_options`].
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    pub program: Program,
    pub method: String,
    pub basis: String,
    pub geometry: Geometry,
    pub charge: i32,
    pub mult: u32,
    pub kind: JobKind,
    /// Z-matrix coordinate names held fixed during an optimization.
    pub frozen_coordinates: Vec<String>,
    /// Optimize to a saddle point rather than a minimum.
    pub saddle: bool,
    pub comment: String,
    pub options: OptionSet,
}

impl JobSpec {
    pub fn new(
        program: Program,
        method: impl Into<String>,
        basis: impl Into<String>,
        geometry: Geometry,
        charge: i32,
        mult: u32,
    ) -> Self {
        Self {
            program,
            method: method.into(),
            basis: basis.into(),
            geometry,
            charge,
            mult,
            kind: JobKind::Energy,
            frozen_coordinates: Vec::new(),
            saddle: false,
            comment: String::new(),
            options: OptionSet::new(),
        }
    }

    pub fn with_kind(mut self, kind: JobKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }
}
