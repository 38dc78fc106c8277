// src/core/functions/function_spec.rs

//! Defines the `FunctionSpec` trait, which provides metadata about a function.

/// A trait for describing a function to the engine and its logs.
pub trait FunctionSpec {
    /// The lowercase name of the function. An alias reports the function it aliases.
    fn name(&self) -> &str;
}
