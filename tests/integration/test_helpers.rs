// tests/integration/test_helpers.rs

//! Test helpers and utilities for integration tests

use spineljson::config::Config;
use spineljson::core::value::JsonValue;
use spineljson::core::{Engine, SpinelJsonError, SqlArg, SqlValue};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// TestContext wraps a real engine with the shorthand the tests lean on.
pub struct TestContext {
    pub engine: Arc<Engine>,
}

impl TestContext {
    /// Creates a new test context with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new test context with custom configuration
    pub fn with_config(config: Config) -> Self {
        // Initialize tracing (ignore error if already initialized)
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new("warn"))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();

        config.validate().expect("test config should be valid");
        Self {
            engine: Arc::new(Engine::new(config)),
        }
    }

    /// Calls a function with positional arguments only.
    pub fn call(&self, name: &str, args: Vec<SqlValue>) -> Result<SqlValue, SpinelJsonError> {
        let args: Vec<SqlArg> = args.into_iter().map(SqlArg::positional).collect();
        self.engine.call(name, &args)
    }

    /// Calls a function with a mix of positional and named arguments.
    pub fn call_args(&self, name: &str, args: &[SqlArg]) -> Result<SqlValue, SpinelJsonError> {
        self.engine.call(name, args)
    }

    pub fn safe_call(&self, name: &str, args: Vec<SqlValue>) -> SqlValue {
        let args: Vec<SqlArg> = args.into_iter().map(SqlArg::positional).collect();
        self.engine.safe_call(name, &args)
    }

    /// PARSE_JSON in exact mode, unwrapped.
    pub fn parse(&self, text: &str) -> SqlValue {
        self.call("parse_json", vec![SqlValue::varchar(text)])
            .expect("fixture JSON should parse")
    }

    pub fn query(&self, doc: &SqlValue, path: &str) -> Result<SqlValue, SpinelJsonError> {
        self.call("json_query", vec![doc.clone(), SqlValue::varchar(path)])
    }

    pub fn value(&self, doc: &SqlValue, path: &str) -> Result<SqlValue, SpinelJsonError> {
        self.call("json_value", vec![doc.clone(), SqlValue::varchar(path)])
    }

    pub fn set(
        &self,
        doc: &SqlValue,
        path: &str,
        value: SqlValue,
    ) -> Result<SqlValue, SpinelJsonError> {
        self.call("json_set", vec![doc.clone(), SqlValue::varchar(path), value])
    }

    pub fn remove(&self, doc: &SqlValue, path: &str) -> Result<SqlValue, SpinelJsonError> {
        self.call("json_remove", vec![doc.clone(), SqlValue::varchar(path)])
    }

    /// Serializes a result back to compact JSON text.
    pub fn to_json_string(&self, value: SqlValue) -> String {
        match self.call("to_json_string", vec![value]) {
            Ok(SqlValue::Varchar(text)) => text,
            other => panic!("TO_JSON_STRING should return VARCHAR, got {:?}", other),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwraps a JSON result.
pub fn as_json(value: &SqlValue) -> &JsonValue {
    match value {
        SqlValue::Json(j) => j,
        other => panic!("expected a JSON value, got {:?}", other),
    }
}
