// src/core/functions/json/json_query.rs

//! `JSON_QUERY` and `JSON_QUERY_ARRAY` (also reachable as `JSON_EXTRACT` and
//! `JSON_EXTRACT_ARRAY`).

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{JsonInput, extract_path_or_root, extract_text, split_args};
use crate::core::path::lookup;
use crate::core::sql::{SqlArg, SqlValue};

/// `JSON_QUERY(json_or_text, path)`
#[derive(Debug, Clone, PartialEq)]
pub struct JsonQuery {
    pub input: JsonInput,
    pub path: Option<String>,
}

impl ParseFunction for JsonQuery {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_query", args, &[])?;
        args.expect_count(2, 2)?;
        Ok(JsonQuery {
            input: JsonInput::from_arg(args.positional[0], "json_query")?,
            path: extract_text(args.positional[1], "json_query")?,
        })
    }
}

impl ExecutableFunction for JsonQuery {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let path = ctx.compile_optional(self.path.as_deref())?;
        let (Some(path), Some(root)) = (path, self.input.resolve(ctx)) else {
            return Ok(SqlValue::Null);
        };
        Ok(match lookup(&root, &path).found() {
            Some(found) => self.input.render(found),
            None => SqlValue::Null,
        })
    }
}

impl FunctionSpec for JsonQuery {
    fn name(&self) -> &str {
        "json_query"
    }
}

/// `JSON_QUERY_ARRAY(json_or_text [, path])`
#[derive(Debug, Clone, PartialEq)]
pub struct JsonQueryArray {
    pub input: JsonInput,
    pub path: Option<String>,
}

impl ParseFunction for JsonQueryArray {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_query_array", args, &[])?;
        args.expect_count(1, 2)?;
        Ok(JsonQueryArray {
            input: JsonInput::from_arg(args.positional[0], "json_query_array")?,
            path: extract_path_or_root(args.get(1), "json_query_array")?,
        })
    }
}

impl ExecutableFunction for JsonQueryArray {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let path = ctx.compile_optional(self.path.as_deref())?;
        let (Some(path), Some(root)) = (path, self.input.resolve(ctx)) else {
            return Ok(SqlValue::Null);
        };
        let Some(items) = lookup(&root, &path).found().and_then(|v| v.as_array()) else {
            return Ok(SqlValue::Null);
        };
        Ok(SqlValue::Array(
            items.iter().map(|item| self.input.render(item)).collect(),
        ))
    }
}

impl FunctionSpec for JsonQueryArray {
    fn name(&self) -> &str {
        "json_query_array"
    }
}
