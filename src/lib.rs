// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;

// Re-export
pub use crate::core::{Engine, JsonValue, SpinelJsonError, SqlArg, SqlValue};
