// src/core/path/mod.rs

//! JSONPath support: compilation, lookup and a compiled-path cache.

pub mod cache;
pub mod compiler;
pub mod evaluator;

pub use cache::PathCache;
pub use compiler::{CompiledPath, DEFAULT_MAX_PATH_STEPS, Step, compile};
pub use evaluator::{Lookup, lookup};
