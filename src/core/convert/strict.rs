// src/core/convert/strict.rs

//! Strict extraction: the JSON type must match the target and the value must fit it.

use super::ScalarTarget;
use crate::core::SpinelJsonError;
use crate::core::sql::SqlValue;
use crate::core::value::{JsonValue, WideNumberMode};

/// Converts `value` to `target`. `mode` only matters for `FLOAT` and `DOUBLE`.
pub fn strict(
    value: &JsonValue,
    target: ScalarTarget,
    mode: WideNumberMode,
) -> Result<SqlValue, SpinelJsonError> {
    match (target, value) {
        (ScalarTarget::Bool, JsonValue::Bool(b)) => Ok(SqlValue::Bool(*b)),
        (ScalarTarget::Varchar, JsonValue::String(s)) => Ok(SqlValue::Varchar(s.to_string())),
        (ScalarTarget::Float, JsonValue::Number(n)) => n.to_f32(mode).map(SqlValue::Float),
        (ScalarTarget::Double, JsonValue::Number(n)) => n.to_f64(mode).map(SqlValue::Double),
        (target, JsonValue::Number(n)) if target.is_integer() => {
            let decimal = n.to_decimal();
            if !decimal.is_integer() {
                return Err(SpinelJsonError::Conversion(format!(
                    "{n} is not an integer and cannot be converted to {target}"
                )));
            }
            decimal
                .to_i128()
                .and_then(|v| target.integer_value(v))
                .ok_or_else(|| {
                    SpinelJsonError::Conversion(format!("{n} is out of range for {target}"))
                })
        }
        (target, value) => Err(SpinelJsonError::Conversion(format!(
            "cannot convert JSON {} to {target}",
            value.json_type()
        ))),
    }
}

/// Converts every element of a JSON array strictly. The first failure fails the call.
pub fn strict_array(
    value: &JsonValue,
    target: ScalarTarget,
    mode: WideNumberMode,
) -> Result<SqlValue, SpinelJsonError> {
    let items = value.as_array().ok_or_else(|| {
        SpinelJsonError::Conversion(format!(
            "cannot convert JSON {} to ARRAY<{target}>",
            value.json_type()
        ))
    })?;
    items
        .iter()
        .map(|item| strict(item, target, mode))
        .collect::<Result<Vec<_>, _>>()
        .map(SqlValue::Array)
}
