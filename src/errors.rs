// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::{ErrorKind, Program};

#[derive(Error, Debug)]
pub enum QcRunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The geometry is neither a Cartesian nor a Z-matrix geometry.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An option name outside the program's allow-list.
    #[error("option '{option}' is not supported by {program}")]
    UnknownOption { program: Program, option: String },

    /// An error kind the program cannot exhibit.
    #[error("{program} does not recognise error kind '{kind}'")]
    UnsupportedKind { program: Program, kind: ErrorKind },

    /// Every remedy in the ladder for `kind` was tried without clearing it.
    #[error("ladder for '{kind}' exhausted after {attempts} attempts")]
    LadderExhausted {
        kind: ErrorKind,
        attempts: usize,
        output: Option<String>,
    },

    /// The run never reached a classifiable stage.
    #[error("run did not terminate normally after {attempts} attempts")]
    Unclassified {
        attempts: usize,
        output: Option<String>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QcRunError {
    /// Output text of the last attempt, for failures that carry one.
    pub fn last_output(&self) -> Option<&str> {
        match self {
            QcRunError::LadderExhausted { output, .. }
            | QcRunError::Unclassified { output, .. } => output.as_deref(),
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, QcRunError>;
