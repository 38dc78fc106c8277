// src/core/errors.rs

//! Defines the primary error type for the JSON function engine.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The main error enum, representing every fatal failure a function call can report.
/// Per-pair mutation skips and SQL `NULL` propagation are not errors and never appear here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpinelJsonError {
    /// Malformed JSON text.
    #[error("Invalid JSON at position {position}: {message}")]
    Parse { message: String, position: usize },

    /// A number cannot be represented in the requested domain without losing precision.
    #[error("Precision error: {0}")]
    Precision(String),

    /// A malformed JSONPath literal. Always fatal, whatever the calling function's skip policy.
    #[error("Invalid JSONPath '{path}': {message}")]
    Compile { path: String, message: String },

    /// A strict extractor met a JSON type or value outside its target domain.
    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Wrong number of arguments for '{0}' function")]
    WrongArgumentCount(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An argument has a SQL type the function has no overload for.
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// A malformed CLI expression.
    #[error("Syntax error: {0}")]
    SyntaxError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpinelJsonError {
    /// Shorthand for a parse error at a byte offset.
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        SpinelJsonError::Parse {
            message: message.into(),
            position,
        }
    }

    /// Shorthand for a path compile error.
    pub fn compile(path: &str, message: impl Into<String>) -> Self {
        SpinelJsonError::Compile {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

// --- From trait implementations for easy error conversion ---

impl From<ParseIntError> for SpinelJsonError {
    fn from(e: ParseIntError) -> Self {
        SpinelJsonError::InvalidArgument(format!("not an integer: {e}"))
    }
}

impl From<ParseFloatError> for SpinelJsonError {
    fn from(e: ParseFloatError) -> Self {
        SpinelJsonError::InvalidArgument(format!("not a valid float: {e}"))
    }
}
