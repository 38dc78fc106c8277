// src/core/value/mod.rs

//! The JSON value model: an immutable tagged union whose containers sit behind `Arc`,
//! so cloning a document is cheap and edits can share every untouched subtree.

pub mod number;
pub mod parser;
pub mod writer;

pub use number::{
    Decimal, ExactNumber, MAX_SAFE_INTEGER, WideNumber, WideNumberMode, format_double,
    format_float,
};
pub use parser::{ParseOptions, parse};

use crate::core::SpinelJsonError;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{AsRefStr, Display};

/// An ordered object body. Insertion order is the document order.
pub type JsonObject = IndexMap<String, JsonValue>;

#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(ExactNumber),
    String(Arc<str>),
    Array(Arc<Vec<JsonValue>>),
    Object(Arc<JsonObject>),
}

/// The six JSON types, named the way `JSON_TYPE` reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonValue {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        JsonValue::String(s.into())
    }

    pub fn array(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(Arc::new(items))
    }

    pub fn object(map: JsonObject) -> Self {
        JsonValue::Object(Arc::new(map))
    }

    /// Builds an object from pairs; the first occurrence of a key wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, JsonValue)>) -> Self {
        let mut map = JsonObject::new();
        for (key, value) in pairs {
            map.entry(key).or_insert(value);
        }
        JsonValue::object(map)
    }

    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// True for booleans, numbers and strings.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_)
        )
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&ExactNumber> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?.get(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }

    /// Whether both values are the same container allocation.
    /// Scalars never share an allocation in this sense.
    pub fn shares_allocation(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (JsonValue::Array(a), JsonValue::Array(b)) => Arc::ptr_eq(a, b),
            (JsonValue::Object(a), JsonValue::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn to_pretty_string(&self, indent: usize) -> String {
        let mut out = String::new();
        writer::write_pretty(self, indent, &mut out);
        out
    }
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => Arc::ptr_eq(a, b) || a == b,
            // IndexMap equality ignores order, which is what object equality wants.
            (JsonValue::Object(a), JsonValue::Object(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writer::write_compact(self, &mut out);
        f.write_str(&out)
    }
}

impl FromStr for JsonValue {
    type Err = SpinelJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, &ParseOptions::default())
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue::Number(ExactNumber::Int(v))
    }
}

impl From<u64> for JsonValue {
    fn from(v: u64) -> Self {
        JsonValue::Number(ExactNumber::from_u64(v))
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.into())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s.into())
    }
}

impl From<ExactNumber> for JsonValue {
    fn from(n: ExactNumber) -> Self {
        JsonValue::Number(n)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::array(items)
    }
}
