// src/core/functions/mod.rs

//! This module defines all supported functions, organizes them into families,
//! and provides the central `Function` enum that encapsulates their parsed state.

pub mod extract;
pub mod function_spec;
pub mod function_trait;
pub mod helpers;
pub mod json;

pub use function_spec::FunctionSpec;
pub use function_trait::{ExecutableFunction, ParseFunction};

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::sql::{SqlArg, SqlValue};
use extract::{ExtractorKind, LaxExtract, StrictExtract};
use json::{
    JsonArrayAppend, JsonArrayBuild, JsonArrayInsert, JsonObjectBuild, JsonQuery, JsonQueryArray,
    JsonRemove, JsonSet, JsonStripNulls, JsonTypeOf, JsonValueArray, JsonValueScalar, ParseJson,
    ToJson, ToJsonString,
};

/// A parsed function call, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    ParseJson(ParseJson),
    ToJson(ToJson),
    ToJsonString(ToJsonString),
    JsonQuery(JsonQuery),
    JsonQueryArray(JsonQueryArray),
    JsonValue(JsonValueScalar),
    JsonValueArray(JsonValueArray),
    JsonSet(JsonSet),
    JsonRemove(JsonRemove),
    JsonArrayAppend(JsonArrayAppend),
    JsonArrayInsert(JsonArrayInsert),
    JsonType(JsonTypeOf),
    JsonArray(JsonArrayBuild),
    JsonObject(JsonObjectBuild),
    JsonStripNulls(JsonStripNulls),
    Strict(StrictExtract),
    Lax(LaxExtract),
}

impl Function {
    /// Resolves `name` (case-insensitive) and parses `args` for it.
    pub fn parse(name: &str, args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let lower = name.to_ascii_lowercase();
        let function = match lower.as_str() {
            "parse_json" => Function::ParseJson(ParseJson::parse(args)?),
            "to_json" => Function::ToJson(ToJson::parse(args)?),
            "to_json_string" => Function::ToJsonString(ToJsonString::parse(args)?),
            "json_query" | "json_extract" => Function::JsonQuery(JsonQuery::parse(args)?),
            "json_query_array" | "json_extract_array" => {
                Function::JsonQueryArray(JsonQueryArray::parse(args)?)
            }
            "json_value" | "json_extract_scalar" => {
                Function::JsonValue(JsonValueScalar::parse(args)?)
            }
            "json_value_array" | "json_extract_string_array" => {
                Function::JsonValueArray(JsonValueArray::parse(args)?)
            }
            "json_set" => Function::JsonSet(JsonSet::parse(args)?),
            "json_remove" => Function::JsonRemove(JsonRemove::parse(args)?),
            "json_array_append" => Function::JsonArrayAppend(JsonArrayAppend::parse(args)?),
            "json_array_insert" => Function::JsonArrayInsert(JsonArrayInsert::parse(args)?),
            "json_type" => Function::JsonType(JsonTypeOf::parse(args)?),
            "json_array" => Function::JsonArray(JsonArrayBuild::parse(args)?),
            "json_object" => Function::JsonObject(JsonObjectBuild::parse(args)?),
            "json_strip_nulls" => Function::JsonStripNulls(JsonStripNulls::parse(args)?),
            other => match ExtractorKind::resolve(other) {
                Some(kind) if kind.lax => Function::Lax(LaxExtract::parse(kind, args)?),
                Some(kind) => Function::Strict(StrictExtract::parse(kind, args)?),
                None => {
                    return Err(SpinelJsonError::UnknownFunction(name.to_uppercase()));
                }
            },
        };
        Ok(function)
    }
}

impl ExecutableFunction for Function {
    /// Dispatches execution to the specific function's implementation.
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        match self {
            Function::ParseJson(f) => f.execute(ctx),
            Function::ToJson(f) => f.execute(ctx),
            Function::ToJsonString(f) => f.execute(ctx),
            Function::JsonQuery(f) => f.execute(ctx),
            Function::JsonQueryArray(f) => f.execute(ctx),
            Function::JsonValue(f) => f.execute(ctx),
            Function::JsonValueArray(f) => f.execute(ctx),
            Function::JsonSet(f) => f.execute(ctx),
            Function::JsonRemove(f) => f.execute(ctx),
            Function::JsonArrayAppend(f) => f.execute(ctx),
            Function::JsonArrayInsert(f) => f.execute(ctx),
            Function::JsonType(f) => f.execute(ctx),
            Function::JsonArray(f) => f.execute(ctx),
            Function::JsonObject(f) => f.execute(ctx),
            Function::JsonStripNulls(f) => f.execute(ctx),
            Function::Strict(f) => f.execute(ctx),
            Function::Lax(f) => f.execute(ctx),
        }
    }
}

impl Function {
    fn spec(&self) -> &dyn FunctionSpec {
        match self {
            Function::ParseJson(f) => f,
            Function::ToJson(f) => f,
            Function::ToJsonString(f) => f,
            Function::JsonQuery(f) => f,
            Function::JsonQueryArray(f) => f,
            Function::JsonValue(f) => f,
            Function::JsonValueArray(f) => f,
            Function::JsonSet(f) => f,
            Function::JsonRemove(f) => f,
            Function::JsonArrayAppend(f) => f,
            Function::JsonArrayInsert(f) => f,
            Function::JsonType(f) => f,
            Function::JsonArray(f) => f,
            Function::JsonObject(f) => f,
            Function::JsonStripNulls(f) => f,
            Function::Strict(f) => f,
            Function::Lax(f) => f,
        }
    }
}

impl FunctionSpec for Function {
    fn name(&self) -> &str {
        self.spec().name()
    }
}
