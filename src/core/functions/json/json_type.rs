// src/core/functions/json/json_type.rs

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{extract_json, split_args};
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// `JSON_TYPE(json)`: the outermost JSON type as `'object'`, `'array'`, `'string'`,
/// `'number'`, `'boolean'` or `'null'`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonTypeOf {
    pub json: Option<JsonValue>,
}

impl ParseFunction for JsonTypeOf {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_type", args, &[])?;
        args.expect_count(1, 1)?;
        Ok(JsonTypeOf {
            json: extract_json(args.positional[0], "json_type")?,
        })
    }
}

impl ExecutableFunction for JsonTypeOf {
    fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        Ok(match &self.json {
            Some(json) => SqlValue::Varchar(json.json_type().to_string()),
            None => SqlValue::Null,
        })
    }
}

impl FunctionSpec for JsonTypeOf {
    fn name(&self) -> &str {
        "json_type"
    }
}
