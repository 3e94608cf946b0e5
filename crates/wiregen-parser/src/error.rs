//! Parse errors with source positions.

use thiserror::Error;

/// A located syntax error. The front end never panics on malformed input;
/// the driver reports the error and skips the unit.
#[derive(Debug, Clone, Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct ParseError {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}
