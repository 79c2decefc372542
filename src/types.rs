use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// External electronic-structure programs with a status table.
///
/// Each program declares which error kinds it can exhibit and which option
/// names its writer understands (see [`crate::status::registry`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    Gaussian09,
    Gaussian16,
    Psi4,
    Orca4,
    Molpro2015,
    Nwchem6,
}

impl Program {
    pub const ALL: [Program; 6] = [
        Program::Gaussian09,
        Program::Gaussian16,
        Program::Psi4,
        Program::Orca4,
        Program::Molpro2015,
        Program::Nwchem6,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Program::Gaussian09 => "gaussian09",
            Program::Gaussian16 => "gaussian16",
            Program::Psi4 => "psi4",
            Program::Orca4 => "orca4",
            Program::Molpro2015 => "molpro2015",
            Program::Nwchem6 => "nwchem6",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Program::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| format!("unknown program: {wanted}"))
    }
}

/// A recognisable failure signature in program output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// SCF did not converge.
    ScfNoconv,
    /// Geometry optimization ran out of steps.
    OptNoconv,
    /// IRC corrector steps exceeded.
    IrcNoconv,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 3] = [ErrorKind::ScfNoconv, ErrorKind::OptNoconv, ErrorKind::IrcNoconv];

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::ScfNoconv => "scf_noconv",
            ErrorKind::OptNoconv => "opt_noconv",
            ErrorKind::IrcNoconv => "irc_noconv",
        }
    }

    /// The convergence signature that rescues this error when both appear.
    pub fn paired_success(self) -> SuccessKind {
        match self {
            ErrorKind::ScfNoconv => SuccessKind::ScfConv,
            ErrorKind::OptNoconv => SuccessKind::OptConv,
            ErrorKind::IrcNoconv => SuccessKind::IrcConv,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ErrorKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| {
                format!("invalid error kind: {wanted} (expected \"scf_noconv\", \"opt_noconv\" or \"irc_noconv\")")
            })
    }
}

/// A recognisable convergence signature, paired 1:1 with an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessKind {
    ScfConv,
    OptConv,
    IrcConv,
}

impl SuccessKind {
    pub fn name(self) -> &'static str {
        match self {
            SuccessKind::ScfConv => "scf_conv",
            SuccessKind::OptConv => "opt_conv",
            SuccessKind::IrcConv => "irc_conv",
        }
    }
}

impl fmt::Display for SuccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which genuine failure drives escalation when several co-occur in one
/// output.
///
/// - `Declared`: the first kind in the caller's guard order wins (default).
/// - `Explicit`: kinds are ranked by the given list; kinds missing from the
///   list rank after it, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FailurePriority {
    #[default]
    Declared,
    Explicit(Vec<ErrorKind>),
}

impl FailurePriority {
    /// Pick the winning kind among `failing`, given the declared guard order.
    pub fn select(&self, declared: &[ErrorKind], failing: &[ErrorKind]) -> Option<ErrorKind> {
        match self {
            FailurePriority::Declared => declared.iter().copied().find(|k| failing.contains(k)),
            FailurePriority::Explicit(order) => order
                .iter()
                .copied()
                .find(|k| failing.contains(k) && declared.contains(k))
                .or_else(|| declared.iter().copied().find(|k| failing.contains(k))),
        }
    }
}
