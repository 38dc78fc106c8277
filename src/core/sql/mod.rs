// src/core/sql/mod.rs

//! The SQL side of the function boundary: typed argument and result values.

use crate::core::value::writer::write_escaped_str;
use crate::core::value::{Decimal, JsonValue, format_double, format_float};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;
use strum_macros::{Display, EnumString};

/// A fully evaluated SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Integer(i32),
    BigInt(i64),
    UInteger(u32),
    UBigInt(u64),
    Float(f32),
    Double(f64),
    Numeric(Decimal),
    Varchar(String),
    Bytes(Bytes),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// Always UTC.
    Timestamp(DateTime<Utc>),
    Array(Vec<SqlValue>),
    /// Fields in declaration order. Names may repeat.
    Struct(Vec<(String, SqlValue)>),
    Json(JsonValue),
}

/// SQL type names, as used by typed literals and in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SqlType {
    Null,
    Bool,
    Integer,
    BigInt,
    UInteger,
    UBigInt,
    Float,
    Double,
    Numeric,
    Varchar,
    Bytes,
    Date,
    Time,
    DateTime,
    Timestamp,
    Array,
    Struct,
    Json,
}

impl SqlValue {
    pub fn sql_type(&self) -> SqlType {
        match self {
            SqlValue::Null => SqlType::Null,
            SqlValue::Bool(_) => SqlType::Bool,
            SqlValue::Integer(_) => SqlType::Integer,
            SqlValue::BigInt(_) => SqlType::BigInt,
            SqlValue::UInteger(_) => SqlType::UInteger,
            SqlValue::UBigInt(_) => SqlType::UBigInt,
            SqlValue::Float(_) => SqlType::Float,
            SqlValue::Double(_) => SqlType::Double,
            SqlValue::Numeric(_) => SqlType::Numeric,
            SqlValue::Varchar(_) => SqlType::Varchar,
            SqlValue::Bytes(_) => SqlType::Bytes,
            SqlValue::Date(_) => SqlType::Date,
            SqlValue::Time(_) => SqlType::Time,
            SqlValue::DateTime(_) => SqlType::DateTime,
            SqlValue::Timestamp(_) => SqlType::Timestamp,
            SqlValue::Array(_) => SqlType::Array,
            SqlValue::Struct(_) => SqlType::Struct,
            SqlValue::Json(_) => SqlType::Json,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn varchar(s: impl Into<String>) -> Self {
        SqlValue::Varchar(s.into())
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            SqlValue::Json(j) => Some(j),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Varchar(s) => Some(s),
            _ => None,
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Varchar(s) => {
                let mut quoted = String::new();
                write_escaped_str(s, &mut quoted);
                f.write_str(&quoted)
            }
            other => write!(f, "{other}"),
        }
    }
}

/// Text form used by the CLI. Top-level strings print raw; strings nested in arrays
/// and structs print quoted.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Bool(b) => write!(f, "{b}"),
            SqlValue::Integer(v) => write!(f, "{v}"),
            SqlValue::BigInt(v) => write!(f, "{v}"),
            SqlValue::UInteger(v) => write!(f, "{v}"),
            SqlValue::UBigInt(v) => write!(f, "{v}"),
            SqlValue::Float(v) => f.write_str(&format_float(*v)),
            SqlValue::Double(v) => f.write_str(&format_double(*v)),
            SqlValue::Numeric(d) => write!(f, "{d}"),
            SqlValue::Varchar(s) => f.write_str(s),
            SqlValue::Bytes(b) => f.write_str(&STANDARD.encode(b)),
            SqlValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SqlValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            SqlValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            SqlValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S%.fZ")),
            SqlValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            SqlValue::Struct(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: ")?;
                    value.fmt_nested(f)?;
                }
                f.write_str("}")
            }
            SqlValue::Json(j) => write!(f, "{j}"),
        }
    }
}

impl From<JsonValue> for SqlValue {
    fn from(j: JsonValue) -> Self {
        SqlValue::Json(j)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Varchar(s.to_string())
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::BigInt(v)
    }
}

/// A function argument, optionally named (`name => value`).
#[derive(Debug, Clone, PartialEq)]
pub struct SqlArg {
    pub name: Option<String>,
    pub value: SqlValue,
}

impl SqlArg {
    pub fn positional(value: impl Into<SqlValue>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

impl From<SqlValue> for SqlArg {
    fn from(value: SqlValue) -> Self {
        SqlArg::positional(value)
    }
}
