// src/core/convert/lax.rs

//! Lax extraction: best-effort conversion that yields SQL `NULL` instead of failing.

use super::{ScalarTarget, scalar_text};
use crate::core::sql::SqlValue;
use crate::core::value::{Decimal, JsonValue};

/// A number read from a JSON string.
enum LaxNumber {
    Finite(Decimal),
    NaN,
    Infinite { negative: bool },
}

fn parse_lax_number(s: &str) -> Option<LaxNumber> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if body.eq_ignore_ascii_case("nan") {
        return Some(LaxNumber::NaN);
    }
    if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        return Some(LaxNumber::Infinite { negative });
    }
    Decimal::parse(s).map(LaxNumber::Finite)
}

pub fn lax(value: &JsonValue, target: ScalarTarget) -> SqlValue {
    let converted = match target {
        ScalarTarget::Bool => lax_bool(value),
        ScalarTarget::Float => lax_f64(value, true),
        ScalarTarget::Double => lax_f64(value, false),
        ScalarTarget::Varchar => scalar_text(value).map(SqlValue::Varchar),
        target => lax_integer(value).and_then(|v| target.integer_value(v)),
    };
    converted.unwrap_or(SqlValue::Null)
}

/// Per-element lax conversion of a JSON array; anything else is `NULL`.
pub fn lax_array(value: &JsonValue, target: ScalarTarget) -> SqlValue {
    match value.as_array() {
        Some(items) => SqlValue::Array(items.iter().map(|item| lax(item, target)).collect()),
        None => SqlValue::Null,
    }
}

fn lax_bool(value: &JsonValue) -> Option<SqlValue> {
    match value {
        JsonValue::Bool(b) => Some(SqlValue::Bool(*b)),
        JsonValue::Number(n) => Some(SqlValue::Bool(!n.is_zero())),
        JsonValue::String(s) if s.eq_ignore_ascii_case("true") => Some(SqlValue::Bool(true)),
        JsonValue::String(s) if s.eq_ignore_ascii_case("false") => Some(SqlValue::Bool(false)),
        _ => None,
    }
}

/// Integers round half away from zero before the range check.
fn lax_integer(value: &JsonValue) -> Option<i128> {
    match value {
        JsonValue::Bool(b) => Some(i128::from(*b)),
        JsonValue::Number(n) => n.to_decimal().round_half_away_from_zero(),
        JsonValue::String(s) => match parse_lax_number(s)? {
            LaxNumber::Finite(d) => d.round_half_away_from_zero(),
            LaxNumber::NaN | LaxNumber::Infinite { .. } => None,
        },
        _ => None,
    }
}

fn lax_f64(value: &JsonValue, single: bool) -> Option<SqlValue> {
    let finite = |d: &Decimal| -> Option<SqlValue> {
        if single {
            Some(d.to_f32()).filter(|f| f.is_finite()).map(SqlValue::Float)
        } else {
            Some(d.to_f64()).filter(|f| f.is_finite()).map(SqlValue::Double)
        }
    };
    let special = |v: f64| -> SqlValue {
        if single {
            SqlValue::Float(v as f32)
        } else {
            SqlValue::Double(v)
        }
    };
    match value {
        JsonValue::Number(n) => finite(&n.to_decimal()),
        JsonValue::String(s) => match parse_lax_number(s)? {
            LaxNumber::Finite(d) => finite(&d),
            LaxNumber::NaN => Some(special(f64::NAN)),
            LaxNumber::Infinite { negative: true } => Some(special(f64::NEG_INFINITY)),
            LaxNumber::Infinite { negative: false } => Some(special(f64::INFINITY)),
        },
        _ => None,
    }
}
