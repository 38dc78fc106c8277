// src/core/functions/json/json_value.rs

//! `JSON_VALUE` and `JSON_VALUE_ARRAY` (also reachable as `JSON_EXTRACT_SCALAR` and
//! `JSON_EXTRACT_STRING_ARRAY`).

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::scalar_text;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{JsonInput, extract_path_or_root, split_args};
use crate::core::path::lookup;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// `JSON_VALUE(json_or_text [, path])`
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValueScalar {
    pub input: JsonInput,
    pub path: Option<String>,
}

impl ParseFunction for JsonValueScalar {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_value", args, &[])?;
        args.expect_count(1, 2)?;
        Ok(JsonValueScalar {
            input: JsonInput::from_arg(args.positional[0], "json_value")?,
            path: extract_path_or_root(args.get(1), "json_value")?,
        })
    }
}

impl ExecutableFunction for JsonValueScalar {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let path = ctx.compile_optional(self.path.as_deref())?;
        let (Some(path), Some(root)) = (path, self.input.resolve(ctx)) else {
            return Ok(SqlValue::Null);
        };
        Ok(lookup(&root, &path)
            .scalar()
            .and_then(scalar_text)
            .map_or(SqlValue::Null, SqlValue::Varchar))
    }
}

impl FunctionSpec for JsonValueScalar {
    fn name(&self) -> &str {
        "json_value"
    }
}

/// `JSON_VALUE_ARRAY(json_or_text [, path])`
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValueArray {
    pub input: JsonInput,
    pub path: Option<String>,
}

impl ParseFunction for JsonValueArray {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_value_array", args, &[])?;
        args.expect_count(1, 2)?;
        Ok(JsonValueArray {
            input: JsonInput::from_arg(args.positional[0], "json_value_array")?,
            path: extract_path_or_root(args.get(1), "json_value_array")?,
        })
    }
}

impl ExecutableFunction for JsonValueArray {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let path = ctx.compile_optional(self.path.as_deref())?;
        let (Some(path), Some(root)) = (path, self.input.resolve(ctx)) else {
            return Ok(SqlValue::Null);
        };
        let Some(items) = lookup(&root, &path).found().and_then(|v| v.as_array()) else {
            return Ok(SqlValue::Null);
        };
        // One nested container makes the whole array unrepresentable as scalars.
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                JsonValue::Null => out.push(SqlValue::Null),
                JsonValue::Array(_) | JsonValue::Object(_) => return Ok(SqlValue::Null),
                scalar => out.push(scalar_text(scalar).map_or(SqlValue::Null, SqlValue::Varchar)),
            }
        }
        Ok(SqlValue::Array(out))
    }
}

impl FunctionSpec for JsonValueArray {
    fn name(&self) -> &str {
        "json_value_array"
    }
}
