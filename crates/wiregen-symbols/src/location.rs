//! Source locations carried through syntax, symbols, and diagnostics

use serde::Serialize;
use std::fmt;

/// A position in an input source file.
///
/// Lines and columns are 1-based; `Location::none()` marks synthesized
/// entities (built-in types, generated members) that have no source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Create a location pointing into a source file
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// A location for entities with no source position
    pub fn none() -> Self {
        Self {
            file: String::new(),
            line: 0,
            column: 0,
        }
    }

    /// Whether this location points into real source
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}
