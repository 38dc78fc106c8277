// src/core/convert/mod.rs

//! Conversions between JSON values and SQL scalars.
//!
//! `strict` fails on anything outside the target domain, `lax` never fails and returns
//! SQL `NULL` instead, and `to_json` maps any SQL value into JSON.

pub mod lax;
pub mod strict;
pub mod to_json;

pub use lax::{lax, lax_array};
pub use strict::{strict, strict_array};
pub use to_json::to_json;

use crate::core::sql::SqlValue;
use crate::core::value::JsonValue;
use strum_macros::Display;

/// The SQL scalar an extractor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ScalarTarget {
    Bool,
    Integer,
    BigInt,
    UInteger,
    UBigInt,
    Float,
    Double,
    Varchar,
}

impl ScalarTarget {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarTarget::Integer
                | ScalarTarget::BigInt
                | ScalarTarget::UInteger
                | ScalarTarget::UBigInt
        )
    }

    /// Narrows an integer into this target, `None` when out of range.
    pub(crate) fn integer_value(self, value: i128) -> Option<SqlValue> {
        match self {
            ScalarTarget::Integer => i32::try_from(value).ok().map(SqlValue::Integer),
            ScalarTarget::BigInt => i64::try_from(value).ok().map(SqlValue::BigInt),
            ScalarTarget::UInteger => u32::try_from(value).ok().map(SqlValue::UInteger),
            ScalarTarget::UBigInt => u64::try_from(value).ok().map(SqlValue::UBigInt),
            _ => None,
        }
    }
}

/// The text `JSON_VALUE` and `LAX_STRING` produce: unquoted string content, canonical
/// number text, `true`/`false`. `None` for `null` and containers.
pub fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
