// src/core/functions/extract/strict.rs

use super::ExtractorKind;
use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::{strict, strict_array};
use crate::core::functions::function_spec::FunctionSpec;
use crate::core::functions::function_trait::ExecutableFunction;
use crate::core::functions::helpers::{extract_json, split_args};
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::{JsonValue, WideNumberMode};

/// A strict extractor, e.g. `BIGINT(json)` or `DOUBLE(json, wide_number_mode => 'exact')`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrictExtract {
    pub kind: ExtractorKind,
    name: String,
    pub json: Option<JsonValue>,
    pub wide_number_mode: WideNumberMode,
}

impl StrictExtract {
    /// Parses the arguments for the extractor `kind`. Only the `FLOAT` and `DOUBLE`
    /// forms accept `wide_number_mode`.
    pub fn parse(kind: ExtractorKind, args: &[SqlArg]) -> Result<Self, SpinelJsonError> {
        let allowed: &[&str] = if kind.is_floating() {
            &["wide_number_mode"]
        } else {
            &[]
        };
        let name = kind.name();
        let args = split_args(&name, args, allowed)?;
        args.expect_count(1, 1)?;
        Ok(StrictExtract {
            kind,
            json: extract_json(args.positional[0], &name)?,
            wide_number_mode: args.wide_mode("wide_number_mode", WideNumberMode::Round)?,
            name,
        })
    }
}

impl ExecutableFunction for StrictExtract {
    fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<SqlValue, SpinelJsonError> {
        let Some(json) = &self.json else {
            return Ok(SqlValue::Null);
        };
        if self.kind.array {
            strict_array(json, self.kind.target, self.wide_number_mode)
        } else {
            strict(json, self.kind.target, self.wide_number_mode)
        }
    }
}

impl FunctionSpec for StrictExtract {
    fn name(&self) -> &str {
        &self.name
    }
}
