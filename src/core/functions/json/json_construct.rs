// src/core/functions/json/json_construct.rs

//! `JSON_ARRAY` and `JSON_OBJECT`: build documents from SQL values.

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::to_json;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::split_args;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// `JSON_ARRAY(value...)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArrayBuild {
    pub values: Vec<SqlValue>,
}

impl ParseFunction for JsonArrayBuild {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_array", args, &[])?;
        Ok(JsonArrayBuild {
            values: args.positional.into_iter().cloned().collect(),
        })
    }
}

impl ExecutableFunction for JsonArrayBuild {
    fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        Ok(SqlValue::Json(JsonValue::array(
            self.values.iter().map(|v| to_json(v, false)).collect(),
        )))
    }
}

impl FunctionSpec for JsonArrayBuild {
    fn name(&self) -> &str {
        "json_array"
    }
}

/// `JSON_OBJECT(key, value [, key, value]...)`
///
/// Keys must be non-`NULL` VARCHARs. A repeated key keeps its first value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObjectBuild {
    pub pairs: Vec<(String, SqlValue)>,
}

impl ParseFunction for JsonObjectBuild {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_object", args, &[])?;
        if args.positional.len() % 2 != 0 {
            return Err(SpinelJsonError::WrongArgumentCount(
                "JSON_OBJECT".to_string(),
            ));
        }
        let pairs = args
            .positional
            .chunks_exact(2)
            .map(|pair| match pair[0] {
                SqlValue::Varchar(key) => Ok((key.clone(), pair[1].clone())),
                SqlValue::Null => Err(SpinelJsonError::InvalidArgument(
                    "JSON_OBJECT keys cannot be NULL".to_string(),
                )),
                other => Err(SpinelJsonError::WrongType(format!(
                    "JSON_OBJECT keys must be VARCHAR, got {}",
                    other.sql_type()
                ))),
            })
            .collect::<Result<_, _>>()?;
        Ok(JsonObjectBuild { pairs })
    }
}

impl ExecutableFunction for JsonObjectBuild {
    fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        Ok(SqlValue::Json(JsonValue::from_pairs(
            self.pairs
                .iter()
                .map(|(key, value)| (key.clone(), to_json(value, false))),
        )))
    }
}

impl FunctionSpec for JsonObjectBuild {
    fn name(&self) -> &str {
        "json_object"
    }
}
