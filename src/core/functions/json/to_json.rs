// src/core/functions/json/to_json.rs

//! `TO_JSON` and `TO_JSON_STRING`.

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::to_json;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::split_args;
use crate::core::sql::{SqlArg, SqlValue};

/// `TO_JSON(value [, stringify_wide_numbers => FALSE])`
#[derive(Debug, Clone, PartialEq)]
pub struct ToJson {
    pub value: SqlValue,
    pub stringify_wide_numbers: bool,
}

impl ParseFunction for ToJson {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("to_json", args, &["stringify_wide_numbers"])?;
        args.expect_count(1, 1)?;
        Ok(ToJson {
            value: args.positional[0].clone(),
            stringify_wide_numbers: args.flag("stringify_wide_numbers", false)?,
        })
    }
}

impl ExecutableFunction for ToJson {
    fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        Ok(SqlValue::Json(to_json(
            &self.value,
            self.stringify_wide_numbers,
        )))
    }
}

impl FunctionSpec for ToJson {
    fn name(&self) -> &str {
        "to_json"
    }
}

/// `TO_JSON_STRING(value [, pretty_print => FALSE])`
#[derive(Debug, Clone, PartialEq)]
pub struct ToJsonString {
    pub value: SqlValue,
    pub pretty_print: bool,
}

impl ParseFunction for ToJsonString {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("to_json_string", args, &["pretty_print"])?;
        args.expect_count(1, 1)?;
        Ok(ToJsonString {
            value: args.positional[0].clone(),
            pretty_print: args.flag("pretty_print", false)?,
        })
    }
}

impl ExecutableFunction for ToJsonString {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let json = to_json(&self.value, false);
        let text = if self.pretty_print {
            json.to_pretty_string(ctx.pretty_indent())
        } else {
            json.to_string()
        };
        Ok(SqlValue::Varchar(text))
    }
}

impl FunctionSpec for ToJsonString {
    fn name(&self) -> &str {
        "to_json_string"
    }
}
