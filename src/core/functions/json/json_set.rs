// src/core/functions/json/json_set.rs

use super::apply_edits;
use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::to_json;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{extract_json, parse_path_value_pairs, split_args};
use crate::core::mutation::EditOp;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// `JSON_SET(json, path, value [, path, value]... [, create_if_missing => TRUE])`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonSet {
    pub json: Option<JsonValue>,
    pub pairs: Vec<(Option<String>, SqlValue)>,
    pub create_if_missing: bool,
}

impl ParseFunction for JsonSet {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_set", args, &["create_if_missing"])?;
        args.expect_count(3, usize::MAX)?;
        Ok(JsonSet {
            json: extract_json(args.positional[0], "json_set")?,
            pairs: parse_path_value_pairs("json_set", &args.positional[1..])?,
            create_if_missing: args.flag("create_if_missing", true)?,
        })
    }
}

impl ExecutableFunction for JsonSet {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let edits = self
            .pairs
            .iter()
            .map(|(path, value)| (path.as_deref(), value));
        apply_edits(ctx, self.json.as_ref(), edits, |path, value| EditOp::Set {
            path,
            value: to_json(value, false),
            create_if_missing: self.create_if_missing,
        })
    }
}

impl FunctionSpec for JsonSet {
    fn name(&self) -> &str {
        "json_set"
    }
}
