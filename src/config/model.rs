// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::RobustRunConfig;
use crate::job::{JobKind, JobSpec};
use crate::option::JobOption;
use crate::types::{ErrorKind, Program};

/// A job file as read from TOML, before validation.
///
/// ```toml
/// [job]
/// program = "gaussian16"
/// method = "hf"
/// basis = "sto-3g"
/// geometry = """
/// O  0.000  0.000 -0.110
/// H  0.000 -1.635  0.876
/// H -0.000  1.635  0.876
/// """
///
/// [run]
/// script = "g16 run.inp run.out"
///
/// [[option]]
/// name = "scf_maxiter"
/// value = 10
///
/// [[guard]]
/// error = "scf_noconv"
/// ladder = [[{ name = "scf_guess", value = "core" }]]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawJobFile {
    pub job: JobSection,

    #[serde(default)]
    pub run: RunSection,

    /// Base options, from `[[option]]`.
    #[serde(default)]
    pub option: Vec<JobOption>,

    /// Guarded error kinds in declaration order, from `[[guard]]`.
    #[serde(default)]
    pub guard: Vec<GuardSection>,
}

/// `[job]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSection {
    pub program: Program,
    pub method: String,
    pub basis: String,

    /// Cartesian (`symbol x y z` lines) or Z-matrix text.
    pub geometry: String,

    #[serde(default)]
    pub charge: i32,

    #[serde(default = "default_mult")]
    pub mult: u32,

    #[serde(default)]
    pub kind: JobKind,

    /// Z-matrix coordinates held fixed in an optimization.
    #[serde(default)]
    pub frozen: Vec<String>,

    #[serde(default)]
    pub saddle: bool,

    #[serde(default)]
    pub comment: String,
}

fn default_mult() -> u32 {
    1
}

/// How to choose between several genuine failures in one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityMode {
    /// First guarded kind in `[[guard]]` order.
    #[default]
    Declared,
    /// Ranked by `priority_order`.
    Explicit,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Shell script run in each attempt directory. Absent means the input is
    /// only generated.
    #[serde(default)]
    pub script: Option<String>,

    /// Attempt directories are created here. Relative paths are resolved
    /// against the job file's directory.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_input_name")]
    pub input_name: String,

    /// The first name is the output that gets classified.
    #[serde(default = "default_output_names")]
    pub output_names: Vec<String>,

    /// Extra files written next to the input: file name -> contents.
    #[serde(default)]
    pub aux: BTreeMap<String, String>,

    #[serde(default)]
    pub priority: PriorityMode,

    #[serde(default)]
    pub priority_order: Vec<ErrorKind>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_root() -> PathBuf {
    PathBuf::from("runs")
}

fn default_input_name() -> String {
    "run.inp".to_string()
}

fn default_output_names() -> Vec<String> {
    vec!["run.out".to_string()]
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            script: None,
            root: default_root(),
            input_name: default_input_name(),
            output_names: default_output_names(),
            aux: BTreeMap::new(),
            priority: PriorityMode::default(),
            priority_order: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// `[[guard]]` entry: an error kind and its remedies, mildest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardSection {
    pub error: ErrorKind,

    #[serde(default)]
    pub ladder: Vec<Vec<JobOption>>,
}

/// A validated job file: the job and everything needed to run it robustly.
///
/// Only obtainable through `TryFrom<RawJobFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct JobFile {
    pub job: JobSpec,
    pub run: RobustRunConfig,
}

impl JobFile {
    pub(crate) fn new_unchecked(job: JobSpec, run: RobustRunConfig) -> Self {
        Self { job, run }
    }
}
