// tests/property/mutation_test.rs

//! Property-based tests for copy-on-write edits

use super::strategies::{arb_json, arb_object, to_engine};
use crate::test_helpers::{TestContext, as_json};
use proptest::prelude::*;
use spineljson::core::SqlValue;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_remove_is_idempotent(doc in arb_object(), key in "[a-z]{1,4}") {
        let ctx = TestContext::new();
        let doc = SqlValue::Json(to_engine(&doc));
        let path = format!("$.{key}");
        let once = ctx.remove(&doc, &path).unwrap();
        let twice = ctx.remove(&once, &path).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(ctx.query(&once, &path).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_set_then_query(doc in arb_object(), key in "[a-z]{1,4}", value in arb_json()) {
        let ctx = TestContext::new();
        let doc = SqlValue::Json(to_engine(&doc));
        let value = SqlValue::Json(to_engine(&value));
        let path = format!("$.{key}");
        let edited = ctx.set(&doc, &path, value.clone()).unwrap();
        prop_assert_eq!(ctx.query(&edited, &path).unwrap(), value);
    }

    #[test]
    fn test_edit_leaves_input_and_siblings_alone(doc in arb_object(), value in arb_json()) {
        let ctx = TestContext::new();
        let original = to_engine(&doc);
        let before = SqlValue::Json(original.clone());
        let edited = ctx
            .set(&before, "$.__added", SqlValue::Json(to_engine(&value)))
            .unwrap();

        prop_assert_eq!(as_json(&before), &to_engine(&doc));
        let edited = as_json(&edited);
        for (key, child) in original.as_object().unwrap().iter() {
            let after = edited.get(key).unwrap();
            prop_assert_eq!(after, child);
            if child.is_container() {
                prop_assert!(after.shares_allocation(child));
            }
        }
    }

    #[test]
    fn test_append_grows_by_one(
        items in prop::collection::vec(arb_json(), 0..8),
        value in arb_json()
    ) {
        let ctx = TestContext::new();
        let doc = SqlValue::Json(to_engine(&serde_json::Value::Array(items.clone())));
        let appended = to_engine(&value);
        let result = ctx
            .call(
                "json_array_append",
                vec![doc, SqlValue::varchar("$"), SqlValue::Json(appended.clone())],
            )
            .unwrap();
        let array = as_json(&result).as_array().unwrap();
        prop_assert_eq!(array.len(), items.len() + 1);
        prop_assert_eq!(&array[items.len()], &appended);
    }

    #[test]
    fn test_insert_then_remove_restores(
        items in prop::collection::vec(arb_json(), 0..8),
        value in arb_json(),
        at in 0usize..8
    ) {
        let ctx = TestContext::new();
        let at = at.min(items.len());
        let doc = SqlValue::Json(to_engine(&serde_json::Value::Array(items)));
        let path = format!("$[{at}]");
        let inserted = ctx
            .call(
                "json_array_insert",
                vec![
                    doc.clone(),
                    SqlValue::varchar(path.clone()),
                    SqlValue::Json(to_engine(&value)),
                ],
            )
            .unwrap();
        let restored = ctx.remove(&inserted, &path).unwrap();
        prop_assert_eq!(restored, doc);
    }
}
