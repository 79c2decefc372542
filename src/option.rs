// src/option.rs

//! Job options and option sets.
//!
//! An option is a `(name, value)` pair understood by a program's input
//! writer. The engine never interprets values; it only validates names against
//! the program's allow-list and merges sets between attempts.
//!
//! Merge contract ([`OptionSet::merge`]):
//! - options whose name is not yet present are appended, in order;
//! - an option whose name is present overwrites the value of the first entry
//!   with that name, and any further entries with that name are removed;
//! - nothing from either side is dropped except the values being overridden.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionName {
    /// Maximum SCF iterations.
    ScfMaxiter,
    /// Toggle DIIS extrapolation.
    ScfDiis,
    /// Initial guess (`core`, `huckel`, ...).
    ScfGuess,
    /// Maximum optimization steps.
    OptMaxiter,
    /// Coordinate system for the optimizer (`zmatrix`, `redundant`, ...).
    OptCoord,
    /// Maximum IRC points.
    IrcMaxiter,
}

impl OptionName {
    pub const ALL: [OptionName; 6] = [
        OptionName::ScfMaxiter,
        OptionName::ScfDiis,
        OptionName::ScfGuess,
        OptionName::OptMaxiter,
        OptionName::OptCoord,
        OptionName::IrcMaxiter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptionName::ScfMaxiter => "scf_maxiter",
            OptionName::ScfDiis => "scf_diis",
            OptionName::ScfGuess => "scf_guess",
            OptionName::OptMaxiter => "opt_maxiter",
            OptionName::OptCoord => "opt_coord",
            OptionName::IrcMaxiter => "irc_maxiter",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OptionName::ALL
            .into_iter()
            .find(|n| n.name() == wanted)
            .ok_or_else(|| format!("unknown option name: {wanted}"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl OptionValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(i64::from(v))
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobOption {
    pub name: OptionName,
    pub value: OptionValue,
}

impl JobOption {
    pub fn new(name: OptionName, value: impl Into<OptionValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for JobOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Ordered collection of options applied to one attempt.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    options: Vec<JobOption>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: OptionName, value: impl Into<OptionValue>) -> Self {
        self.options.push(JobOption::new(name, value));
        self
    }

    pub fn push(&mut self, option: JobOption) {
        self.options.push(option);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobOption> {
        self.options.iter()
    }

    /// Effective value for `name`: the last entry carrying it.
    pub fn get(&self, name: OptionName) -> Option<&OptionValue> {
        self.options
            .iter()
            .rev()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }

    pub fn contains(&self, option: &JobOption) -> bool {
        self.get(option.name) == Some(&option.value)
    }

    /// Merge `other` into a copy of `self`; `other` wins on name clashes.
    pub fn merge(&self, other: &OptionSet) -> OptionSet {
        let mut merged = self.clone();
        merged.merge_in(other);
        merged
    }

    /// In-place form of [`OptionSet::merge`].
    pub fn merge_in(&mut self, other: &OptionSet) {
        for incoming in other.iter() {
            match self.options.iter().position(|o| o.name == incoming.name) {
                Some(first) => {
                    self.options[first].value = incoming.value.clone();
                    let mut idx = 0;
                    self.options.retain(|o| {
                        let keep = idx <= first || o.name != incoming.name;
                        idx += 1;
                        keep
                    });
                }
                None => self.options.push(incoming.clone()),
            }
        }
    }
}

impl FromIterator<JobOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = JobOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.options.iter().map(|o| o.to_string()).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
