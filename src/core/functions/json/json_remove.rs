// src/core/functions/json/json_remove.rs

use super::apply_edits;
use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::{ExecutableFunction, ParseFunction};
use crate::core::functions::helpers::{extract_json, extract_text, split_args};
use crate::core::mutation::EditOp;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// `JSON_REMOVE(json, path [, path]...)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRemove {
    pub json: Option<JsonValue>,
    pub paths: Vec<Option<String>>,
}

impl ParseFunction for JsonRemove {
    fn parse(args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let args = split_args("json_remove", args, &[])?;
        args.expect_count(2, usize::MAX)?;
        let paths = args.positional[1..]
            .iter()
            .map(|value| extract_text(value, "json_remove"))
            .collect::<Result<_, _>>()?;
        Ok(JsonRemove {
            json: extract_json(args.positional[0], "json_remove")?,
            paths,
        })
    }
}

impl ExecutableFunction for JsonRemove {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let edits = self.paths.iter().map(|path| (path.as_deref(), ()));
        apply_edits(ctx, self.json.as_ref(), edits, |path, ()| EditOp::Remove {
            path,
        })
    }
}

impl FunctionSpec for JsonRemove {
    fn name(&self) -> &str {
        "json_remove"
    }
}
