// src/core/functions/json/parse_json.rs

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{extract_text, split_args};
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::{WideNumberMode, parse};

/// `PARSE_JSON(text [, wide_number_mode => 'exact'])`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseJson {
    pub text: Option<String>,
    pub wide_number_mode: WideNumberMode,
}

impl ParseFunction for ParseJson {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("parse_json", args, &["wide_number_mode"])?;
        args.expect_count(1, 1)?;
        Ok(ParseJson {
            text: extract_text(args.positional[0], "parse_json")?,
            wide_number_mode: args.wide_mode("wide_number_mode", WideNumberMode::Exact)?,
        })
    }
}

impl ExecutableFunction for ParseJson {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let Some(text) = &self.text else {
            return Ok(SqlValue::Null);
        };
        let limit = ctx.config.limits.max_input_bytes;
        if text.len() > limit {
            return Err(SpinelJsonError::InvalidArgument(format!(
                "JSON text of {} bytes exceeds the limit of {limit} bytes",
                text.len()
            )));
        }
        let options = ctx.parse_options(Some(self.wide_number_mode));
        parse(text, &options).map(SqlValue::Json)
    }
}

impl FunctionSpec for ParseJson {
    fn name(&self) -> &str {
        "parse_json"
    }
}
