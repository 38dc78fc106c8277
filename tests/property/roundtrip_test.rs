// tests/property/roundtrip_test.rs

//! Property-based tests for roundtrip operations
//! Tests that parsing, serializing and TO_JSON agree with each other and with serde_json

use super::strategies::{arb_json, arb_sql_value, to_engine};
use crate::test_helpers::TestContext;
use proptest::prelude::*;
use spineljson::core::SqlValue;
use spineljson::core::convert::to_json;
use spineljson::core::value::{ParseOptions, parse};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_parse_matches_serde_json(value in arb_json()) {
        let parsed = to_engine(&value);
        let reparsed: serde_json::Value = serde_json::from_str(&parsed.to_string()).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    #[test]
    fn test_compact_and_pretty_text_reparse(value in arb_json(), indent in 1usize..=16) {
        let parsed = to_engine(&value);
        let options = ParseOptions::default();
        prop_assert_eq!(&parse(&parsed.to_string(), &options).unwrap(), &parsed);
        prop_assert_eq!(&parse(&parsed.to_pretty_string(indent), &options).unwrap(), &parsed);
    }

    #[test]
    fn test_parse_json_of_to_json_string(value in arb_sql_value()) {
        let ctx = TestContext::new();
        let text = ctx.to_json_string(value.clone());
        let reparsed = ctx.call("parse_json", vec![SqlValue::varchar(text)]).unwrap();
        prop_assert_eq!(reparsed, SqlValue::Json(to_json(&value, false)));
    }

    #[test]
    fn test_duplicate_keys_keep_first(
        key in "\\PC{0,6}",
        first in arb_json(),
        second in arb_json()
    ) {
        let key = serde_json::to_string(&key).unwrap();
        let dup = format!("{{{key}:{first},{key}:{second}}}");
        let single = format!("{{{key}:{first}}}");
        let options = ParseOptions::default();
        prop_assert_eq!(parse(&dup, &options).unwrap(), parse(&single, &options).unwrap());
    }

    #[test]
    fn test_integer_text_is_preserved(signed in any::<i64>(), unsigned in any::<u64>()) {
        let ctx = TestContext::new();
        for text in [signed.to_string(), unsigned.to_string()] {
            let doc = ctx.parse(&text);
            prop_assert_eq!(ctx.value(&doc, "$").unwrap(), SqlValue::varchar(text.clone()));
        }
    }

    #[test]
    fn test_stringify_only_changes_unsafe_integers(v in any::<i64>()) {
        let plain = to_json(&SqlValue::BigInt(v), false);
        let stringified = to_json(&SqlValue::BigInt(v), true);
        if v.unsigned_abs() <= 9_007_199_254_740_992 {
            prop_assert_eq!(stringified, plain);
        } else {
            let expected = v.to_string();
            prop_assert_eq!(stringified.as_str(), Some(expected.as_str()));
        }
    }
}
