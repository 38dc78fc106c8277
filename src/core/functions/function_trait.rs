// src/core/functions/function_trait.rs

//! Defines the core traits for all executable functions.

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::sql::{SqlArg, SqlValue};

/// A trait for the actual execution logic of a function.
/// Implemented by each function's struct (e.g., `JsonSet`, `ParseJson`).
pub trait ExecutableFunction {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError>;
}

/// A trait for parsing a function's arguments from a slice of `SqlArg`.
pub trait ParseFunction: Sized {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError>;
}
