// src/core/context.rs

//! The per-call execution context handed to every function.

use crate::config::Config;
use crate::core::SpinelJsonError;
use crate::core::path::{CompiledPath, PathCache};
use crate::core::value::{ParseOptions, WideNumberMode};

/// Shared engine state a function may read while executing.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub config: &'a Config,
    pub paths: &'a PathCache,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(config: &'a Config, paths: &'a PathCache) -> Self {
        Self { config, paths }
    }

    /// Compiles a path through the engine's cache.
    pub fn compile_path(&self, text: &str) -> Result<CompiledPath, SpinelJsonError> {
        self.paths.get_or_compile(text)
    }

    /// Compiles an optional path; a SQL `NULL` path stays `None`.
    pub fn compile_optional(
        &self,
        text: Option<&str>,
    ) -> Result<Option<CompiledPath>, SpinelJsonError> {
        text.map(|t| self.compile_path(t)).transpose()
    }

    /// Parser options with the configured depth limit.
    pub fn parse_options(&self, mode: Option<WideNumberMode>) -> ParseOptions {
        ParseOptions::with_mode(mode, self.config.limits.max_depth)
    }

    pub fn pretty_indent(&self) -> usize {
        self.config.output.pretty_indent
    }
}
