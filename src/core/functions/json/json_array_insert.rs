// src/core/functions/json/json_array_insert.rs

use super::apply_edits;
use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{
    edit_values, extract_json, parse_path_value_pairs, split_args,
};
use crate::core::mutation::EditOp;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// `JSON_ARRAY_INSERT(json, path, value [, path, value]... [, insert_each_element => TRUE])`
///
/// Each path must end with an array index; the values are inserted before that element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArrayInsert {
    pub json: Option<JsonValue>,
    pub pairs: Vec<(Option<String>, SqlValue)>,
    pub insert_each_element: bool,
}

impl ParseFunction for JsonArrayInsert {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_array_insert", args, &["insert_each_element"])?;
        args.expect_count(3, usize::MAX)?;
        Ok(JsonArrayInsert {
            json: extract_json(args.positional[0], "json_array_insert")?,
            pairs: parse_path_value_pairs("json_array_insert", &args.positional[1..])?,
            insert_each_element: args.flag("insert_each_element", true)?,
        })
    }
}

impl ExecutableFunction for JsonArrayInsert {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let edits = self
            .pairs
            .iter()
            .map(|(path, value)| (path.as_deref(), value));
        apply_edits(ctx, self.json.as_ref(), edits, |path, value| {
            EditOp::ArrayInsert {
                path,
                values: edit_values(value, self.insert_each_element),
            }
        })
    }
}

impl FunctionSpec for JsonArrayInsert {
    fn name(&self) -> &str {
        "json_array_insert"
    }
}
