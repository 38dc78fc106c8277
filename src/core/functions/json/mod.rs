// src/core/functions/json/mod.rs

//! JSON construction, query and mutation functions.

pub mod json_array_append;
pub mod json_array_insert;
pub mod json_construct;
pub mod json_query;
pub mod json_remove;
pub mod json_set;
pub mod json_strip_nulls;
pub mod json_type;
pub mod json_value;
pub mod parse_json;
pub mod to_json;

pub use json_array_append::JsonArrayAppend;
pub use json_array_insert::JsonArrayInsert;
pub use json_construct::{JsonArrayBuild, JsonObjectBuild};
pub use json_query::{JsonQuery, JsonQueryArray};
pub use json_remove::JsonRemove;
pub use json_set::JsonSet;
pub use json_strip_nulls::JsonStripNulls;
pub use json_type::JsonTypeOf;
pub use json_value::{JsonValueArray, JsonValueScalar};
pub use parse_json::ParseJson;
pub use to_json::{ToJson, ToJsonString};

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::mutation::{EditOp, apply_all};
use crate::core::path::CompiledPath;
use crate::core::sql::SqlValue;
use crate::core::value::JsonValue;
use tracing::trace;

/// Shared body of the mutation functions.
///
/// Every path is compiled and every edit validated before the `NULL` input check, so a
/// malformed request fails even on `NULL` rows. A `NULL` path skips its edit.
pub(super) fn apply_edits<'e, T>(
    ctx: &ExecutionContext<'_>,
    json: Option<&JsonValue>,
    edits: impl Iterator<Item = (Option<&'e str>, T)>,
    mut make_op: impl FnMut(CompiledPath, T) -> EditOp,
) -> Result<SqlValue, SpinelJsonError> {
    let mut ops = Vec::new();
    for (path, payload) in edits {
        let Some(path) = ctx.compile_optional(path)? else {
            trace!("NULL path, edit skipped");
            continue;
        };
        let op = make_op(path, payload);
        op.validate()?;
        ops.push(op);
    }
    let Some(root) = json else {
        return Ok(SqlValue::Null);
    };
    apply_all(root.clone(), &ops, ctx.config.limits.max_array_pad).map(SqlValue::Json)
}
