#![allow(dead_code)]

use std::path::Path;

use qcrun::engine::{EscalationLadder, RobustRunConfig};
use qcrun::job::{Geometry, JobKind, JobSpec};
use qcrun::option::{OptionName, OptionSet, OptionValue};
use qcrun::types::{ErrorKind, Program};

pub const WATER_XYZ: &str = "\
O  0.000000  0.000000 -0.110000
H  0.000000 -1.635000  0.876000
H -0.000000  1.635000  0.876000
";

pub const WATER_ZMATRIX: &str = "\
O
H 1 ROH
H 1 ROH2 2 AHOH

ROH = 0.96
ROH2 = 0.96
AHOH = 104.5
";

pub fn water() -> Geometry {
    Geometry::parse(WATER_XYZ).expect("water geometry parses")
}

pub fn water_zmatrix() -> Geometry {
    Geometry::parse(WATER_ZMATRIX).expect("water Z-matrix parses")
}

/// Builder for `JobSpec` to simplify test setup.
pub struct JobSpecBuilder {
    job: JobSpec,
}

impl JobSpecBuilder {
    /// HF/STO-3G water energy for `program`.
    pub fn new(program: Program) -> Self {
        Self {
            job: JobSpec::new(program, "hf", "sto-3g", water(), 0, 1),
        }
    }

    pub fn method(mut self, method: &str) -> Self {
        self.job.method = method.to_string();
        self
    }

    pub fn basis(mut self, basis: &str) -> Self {
        self.job.basis = basis.to_string();
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.job.geometry = geometry;
        self
    }

    pub fn kind(mut self, kind: JobKind) -> Self {
        self.job.kind = kind;
        self
    }

    pub fn option(mut self, name: OptionName, value: impl Into<OptionValue>) -> Self {
        self.job.options = self.job.options.with(name, value);
        self
    }

    pub fn frozen(mut self, name: &str) -> Self {
        self.job.frozen_coordinates.push(name.to_string());
        self
    }

    pub fn saddle(mut self, val: bool) -> Self {
        self.job.saddle = val;
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.job.comment = comment.to_string();
        self
    }

    pub fn build(self) -> JobSpec {
        self.job
    }
}

/// Ladder with one single-option step per value.
pub fn ladder_of(name: OptionName, values: &[OptionValue]) -> EscalationLadder {
    values
        .iter()
        .map(|v| OptionSet::new().with(name, v.clone()))
        .collect()
}

/// `[{scf_guess: core}, {scf_guess: huckel}]`
pub fn scf_guess_ladder() -> EscalationLadder {
    ladder_of(OptionName::ScfGuess, &["core".into(), "huckel".into()])
}

/// `[{opt_maxiter: 50}, {opt_maxiter: 100, opt_coord: zmatrix}]`
pub fn opt_ladder() -> EscalationLadder {
    EscalationLadder::new(vec![
        OptionSet::new().with(OptionName::OptMaxiter, 50),
        OptionSet::new()
            .with(OptionName::OptMaxiter, 100)
            .with(OptionName::OptCoord, "zmatrix"),
    ])
}

/// Config that runs a placeholder script and guards SCF with
/// [`scf_guess_ladder`].
pub fn scf_guarded_config(root: impl AsRef<Path>) -> RobustRunConfig {
    RobustRunConfig::new(root.as_ref())
        .with_script("g16 run.inp run.out")
        .guard(ErrorKind::ScfNoconv, scf_guess_ladder())
}
