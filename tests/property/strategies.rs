// tests/property/strategies.rs

//! Value generators shared by the property tests.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use proptest::prelude::*;
use serde_json::Value;
use spineljson::core::SqlValue;
use spineljson::core::value::{Decimal, JsonValue, ParseOptions, parse};

/// Finite doubles with a fractional part, so that the oracle and the engine agree on
/// which numbers are integers.
fn fractional_double() -> impl Strategy<Value = f64> {
    (-1.0e9f64..1.0e9).prop_filter("fractional", |f| f.fract() != 0.0)
}

/// Arbitrary documents as `serde_json` values.
pub fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        fractional_double().prop_map(Value::from),
        "\\PC{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{0,4}", inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

/// Arbitrary objects, for edits that address members.
pub fn arb_object() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-z]{1,4}", arb_json()), 0..8)
        .prop_map(|pairs| Value::Object(pairs.into_iter().collect()))
}

/// Converts an oracle value into the engine's representation.
pub fn to_engine(value: &Value) -> JsonValue {
    parse(&value.to_string(), &ParseOptions::default()).expect("oracle output should parse")
}

/// Decimals from small integers up to 30 integer and 25 fraction digits, most of them
/// beyond what a double holds exactly.
fn arb_numeric() -> impl Strategy<Value = Decimal> {
    "-?[0-9]{1,30}(\\.[0-9]{1,25})?"
        .prop_filter_map("valid decimal", |text| Decimal::parse(&text))
}

/// Instants between 1970 and 2100, with nanoseconds.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).unwrap_or_default())
}

/// SQL values of every type `TO_JSON` encodes.
pub fn arb_sql_value() -> impl Strategy<Value = SqlValue> {
    let leaf = prop_oneof![
        Just(SqlValue::Null),
        any::<bool>().prop_map(SqlValue::Bool),
        any::<i32>().prop_map(SqlValue::Integer),
        any::<i64>().prop_map(SqlValue::BigInt),
        any::<u64>().prop_map(SqlValue::UBigInt),
        fractional_double().prop_map(SqlValue::Double),
        (-1.0e6f32..1.0e6).prop_map(SqlValue::Float),
        "\\PC{0,12}".prop_map(SqlValue::Varchar),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|b| SqlValue::Bytes(Bytes::from(b))),
        (700_000i32..760_000).prop_map(|days| {
            SqlValue::Date(NaiveDate::from_num_days_from_ce_opt(days).unwrap_or_default())
        }),
        (0u32..86_400, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
            SqlValue::Time(
                NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).unwrap_or_default(),
            )
        }),
        arb_timestamp().prop_map(|ts| SqlValue::DateTime(ts.naive_utc())),
        arb_timestamp().prop_map(SqlValue::Timestamp),
        arb_numeric().prop_map(SqlValue::Numeric),
    ];
    leaf.prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(SqlValue::Array),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..5).prop_map(SqlValue::Struct),
        ]
    })
}
