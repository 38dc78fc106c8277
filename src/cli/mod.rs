// src/cli/mod.rs

//! Command-line front end: parses call expressions and prints their results.

pub mod expr;

pub use expr::{Expr, eval_str, evaluate, parse_expr};

use crate::core::Engine;

/// The version reported by the build, possibly stamped through `SPINELJSON_VERSION`.
pub const VERSION: &str = env!("SPINELJSON_BUILD_VERSION");

/// `debug` or `release`.
pub const BUILD_PROFILE: &str = env!("SPINELJSON_BUILD_PROFILE");

/// The line `--version` prints.
pub fn version_line() -> String {
    format!("spineljson version {VERSION} ({BUILD_PROFILE} build)")
}

/// Evaluates one input line and renders the outcome the way the binary prints it.
/// Returns the printed text and whether the evaluation succeeded.
pub fn run_line(engine: &Engine, line: &str) -> (String, bool) {
    match eval_str(engine, line) {
        Ok(value) => (value.to_string(), true),
        Err(e) => (format!("ERROR: {e}"), false),
    }
}
