// src/status/pattern.rs

//! Pattern building blocks for free-form program output.
//!
//! Literal marker text goes through [`escape`], which turns every run of
//! whitespace into `\s+`, so a marker still matches when the program pads it
//! differently or wraps it across lines. All patterns compile
//! case-insensitively.

use regex::{Regex, RegexBuilder};

use crate::errors::{QcRunError, Result};

/// Rest of the current line (no newline).
pub const LINE_FILL: &str = r"[^\n]*";

/// A line break, with any surrounding whitespace (blank lines and `\r\n`
/// endings included).
pub const NEWLINE: &str = r"[ \t\r]*\n\s*";

/// Float in plain, `e`/`E` or Fortran `d`/`D` exponent notation.
pub const EXPONENTIAL_FLOAT_D: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[dDeE][+-]?\d+)?";

/// Escape literal marker text, tolerating arbitrary whitespace between words.
pub fn escape(text: &str) -> String {
    text.split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Alternation of the given patterns.
pub fn one_of_these<S: AsRef<str>>(patterns: &[S]) -> String {
    let parts: Vec<&str> = patterns.iter().map(AsRef::as_ref).collect();
    format!("(?:{})", parts.join("|"))
}

/// Join literal fragments so that each must start on a following line.
pub fn lines_of(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(NEWLINE)
}

/// A compiled, case-insensitive marker pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| QcRunError::ConfigError(format!("invalid status pattern {source:?}: {e}")))?;
        Ok(Self { regex })
    }

    /// Pattern matching the literal text (whitespace tolerant).
    pub fn literal(text: &str) -> Result<Self> {
        Self::new(&escape(text))
    }

    pub fn has_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
