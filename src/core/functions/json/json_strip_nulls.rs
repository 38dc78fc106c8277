// src/core/functions/json/json_strip_nulls.rs

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{extract_json, extract_path_or_root, split_args};
use crate::core::mutation::{EditOp, apply};
use crate::core::path::lookup;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::{JsonObject, JsonValue};

/// `JSON_STRIP_NULLS(json [, path] [, include_arrays => TRUE] [, remove_empty => FALSE])`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonStripNulls {
    pub json: Option<JsonValue>,
    pub path: Option<String>,
    pub include_arrays: bool,
    pub remove_empty: bool,
}

impl ParseFunction for JsonStripNulls {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args(
            "json_strip_nulls",
            args,
            &["include_arrays", "remove_empty"],
        )?;
        args.expect_count(1, 2)?;
        Ok(JsonStripNulls {
            json: extract_json(args.positional[0], "json_strip_nulls")?,
            path: extract_path_or_root(args.get(1), "json_strip_nulls")?,
            include_arrays: args.flag("include_arrays", true)?,
            remove_empty: args.flag("remove_empty", false)?,
        })
    }
}

impl JsonStripNulls {
    fn strip(&self, value: &JsonValue) -> JsonValue {
        match value {
            JsonValue::Object(map) => {
                let mut stripped = JsonObject::with_capacity(map.len());
                for (key, child) in map.iter() {
                    if let Some(kept) = self.strip_child(child) {
                        stripped.insert(key.clone(), kept);
                    }
                }
                JsonValue::object(stripped)
            }
            JsonValue::Array(items) if self.include_arrays => JsonValue::array(
                items.iter().filter_map(|item| self.strip_child(item)).collect(),
            ),
            JsonValue::Array(items) => {
                JsonValue::array(items.iter().map(|item| self.strip(item)).collect())
            }
            scalar => scalar.clone(),
        }
    }

    /// `None` when the child should be dropped from its container.
    fn strip_child(&self, child: &JsonValue) -> Option<JsonValue> {
        if child.is_null() {
            return None;
        }
        let stripped = self.strip(child);
        if self.remove_empty && is_empty_container(&stripped) {
            return None;
        }
        Some(stripped)
    }
}

fn is_empty_container(value: &JsonValue) -> bool {
    match value {
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl ExecutableFunction for JsonStripNulls {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let path = ctx.compile_optional(self.path.as_deref())?;
        let (Some(path), Some(root)) = (path, &self.json) else {
            return Ok(SqlValue::Null);
        };
        let Some(target) = lookup(root, &path).found() else {
            return Ok(SqlValue::Json(root.clone()));
        };

        let mut stripped = self.strip(target);
        if self.remove_empty && is_empty_container(&stripped) {
            stripped = JsonValue::Null;
        }
        let op = EditOp::Set {
            path,
            value: stripped,
            create_if_missing: false,
        };
        let (edited, _) = apply(root, &op, ctx.config.limits.max_array_pad)?;
        Ok(SqlValue::Json(edited))
    }
}

impl FunctionSpec for JsonStripNulls {
    fn name(&self) -> &str {
        "json_strip_nulls"
    }
}
