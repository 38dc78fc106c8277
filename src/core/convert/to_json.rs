// src/core/convert/to_json.rs

//! SQL value to JSON encoding.

use crate::core::sql::SqlValue;
use crate::core::value::{
    Decimal, ExactNumber, JsonValue, MAX_SAFE_INTEGER, WideNumberMode, format_double,
    format_float,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Encodes `value` as JSON. With `stringify_wide_numbers`, integers beyond ±2^53 and
/// numerics a double cannot hold become strings so that JSON consumers do not round them;
/// without it such numerics are rounded to the nearest double.
pub fn to_json(value: &SqlValue, stringify_wide_numbers: bool) -> JsonValue {
    match value {
        SqlValue::Null => JsonValue::Null,
        SqlValue::Bool(b) => JsonValue::Bool(*b),
        SqlValue::Integer(v) => JsonValue::from(i64::from(*v)),
        SqlValue::UInteger(v) => JsonValue::from(i64::from(*v)),
        SqlValue::BigInt(v) => {
            if stringify_wide_numbers && !is_safe_integer(i128::from(*v)) {
                JsonValue::string(v.to_string())
            } else {
                JsonValue::from(*v)
            }
        }
        SqlValue::UBigInt(v) => {
            if stringify_wide_numbers && !is_safe_integer(i128::from(*v)) {
                JsonValue::string(v.to_string())
            } else {
                JsonValue::from(*v)
            }
        }
        SqlValue::Numeric(d) => numeric_to_json(d, stringify_wide_numbers),
        SqlValue::Float(f) => match Decimal::from_f32(*f) {
            Some(d) => number_or_text(&d),
            None => JsonValue::string(format_float(*f)),
        },
        SqlValue::Double(d) => match ExactNumber::from_f64(*d) {
            Some(n) => JsonValue::Number(n),
            None => JsonValue::string(format_double(*d)),
        },
        SqlValue::Varchar(s) => JsonValue::string(s.as_str()),
        SqlValue::Bytes(b) => JsonValue::string(STANDARD.encode(b)),
        SqlValue::Date(d) => JsonValue::string(d.format("%Y-%m-%d").to_string()),
        SqlValue::Time(t) => JsonValue::string(t.format("%H:%M:%S%.f").to_string()),
        SqlValue::DateTime(dt) => {
            JsonValue::string(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }
        SqlValue::Timestamp(ts) => {
            JsonValue::string(ts.format("%Y-%m-%dT%H:%M:%S%.fZ").to_string())
        }
        SqlValue::Array(items) => JsonValue::array(
            items
                .iter()
                .map(|item| to_json(item, stringify_wide_numbers))
                .collect(),
        ),
        SqlValue::Struct(fields) => JsonValue::from_pairs(fields.iter().map(|(name, value)| {
            (name.clone(), to_json(value, stringify_wide_numbers))
        })),
        SqlValue::Json(j) => j.clone(),
    }
}

fn is_safe_integer(v: i128) -> bool {
    let limit = i128::from(MAX_SAFE_INTEGER);
    (-limit..=limit).contains(&v)
}

/// An integer when it fits one, else the nearest double, so that the written text reads
/// back as the same value. Magnitudes beyond `DOUBLE` become text.
fn number_or_text(d: &Decimal) -> JsonValue {
    let literal = d.to_string();
    match ExactNumber::from_decimal(d.clone(), &literal, Some(WideNumberMode::Round)) {
        Ok(n) => JsonValue::Number(n),
        Err(_) => JsonValue::string(literal),
    }
}

/// Whether a JSON consumer reading `d` as a double sees exactly `d`.
fn is_exact_as_double(d: &Decimal) -> bool {
    if d.is_integer() {
        d.to_i128().is_some_and(is_safe_integer)
    } else {
        d.exact_f64().is_some()
    }
}

fn numeric_to_json(d: &Decimal, stringify_wide_numbers: bool) -> JsonValue {
    if stringify_wide_numbers && !is_exact_as_double(d) {
        return JsonValue::string(d.to_string());
    }
    number_or_text(d)
}
