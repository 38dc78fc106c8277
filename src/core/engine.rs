// src/core/engine.rs

//! The entry point callers use to evaluate JSON functions.

use crate::config::Config;
use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::{ExecutableFunction, Function, FunctionSpec};
use crate::core::path::PathCache;
use crate::core::sql::{SqlArg, SqlValue};
use std::sync::Arc;
use tracing::debug;

/// Owns the configuration and the compiled-path cache. `Send + Sync`; share one
/// engine across threads rather than building one per call.
#[derive(Debug)]
pub struct Engine {
    config: Arc<Config>,
    paths: PathCache,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self::with_config(Arc::new(config))
    }

    pub fn with_config(config: Arc<Config>) -> Self {
        let paths = PathCache::new(
            config.limits.path_cache_capacity,
            config.limits.max_path_steps,
        );
        Self { config, paths }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path_cache(&self) -> &PathCache {
        &self.paths
    }

    /// Parses the argument list for `name` and executes the function.
    pub fn call(&self, name: &str, args: &[SqlArg]) -> Result<SqlValue, SpinelJsonError> {
        let function = Function::parse(name, args)?;
        debug!(function = function.name(), args = args.len(), "calling function");
        let ctx = ExecutionContext::new(&self.config, &self.paths);
        function.execute(&ctx)
    }

    /// Like [`Engine::call`] but turns any error into SQL `NULL`.
    pub fn safe_call(&self, name: &str, args: &[SqlArg]) -> SqlValue {
        self.call(name, args).unwrap_or_else(|e| {
            debug!(function = name, error = %e, "safe call returned NULL");
            SqlValue::Null
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
