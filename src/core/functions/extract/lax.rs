// src/core/functions/extract/lax.rs

use super::ExtractorKind;
use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::{lax, lax_array};
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::ExecutableFunction;
use crate::core::functions::helpers::{extract_json, split_args};
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::JsonValue;

/// A lax extractor, e.g. `LAX_INTEGER(json)`. Never fails once its arguments parse.
#[derive(Debug, Clone, PartialEq)]
pub struct LaxExtract {
    pub kind: ExtractorKind,
    name: String,
    pub json: Option<JsonValue>,
}

impl LaxExtract {
    pub fn parse(kind: ExtractorKind, args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let name = kind.name();
        let args = split_args(&name, args, &[])?;
        args.expect_count(1, 1)?;
        Ok(LaxExtract {
            kind,
            json: extract_json(args.positional[0], &name)?,
            name,
        })
    }
}

impl ExecutableFunction for LaxExtract {
    fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let Some(json) = &self.json else {
            return Ok(SqlValue::Null);
        };
        Ok(if self.kind.array {
            lax_array(json, self.kind.target)
        } else {
            lax(json, self.kind.target)
        })
    }
}

impl FunctionSpec for LaxExtract {
    fn name(&self) -> &str {
        &self.name
    }
}
