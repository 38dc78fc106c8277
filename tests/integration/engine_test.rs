// tests/integration/engine_test.rs

//! End-to-end workflows over realistic documents.

use super::fixtures::{NUMBERS, ODD_KEYS, ORDER, array_of_objects};
use super::test_helpers::{TestContext, as_json};
use spineljson::config::Config;
use spineljson::core::{SpinelJsonError, SqlArg, SqlValue};

#[test]
fn test_read_order_fields() {
    let ctx = TestContext::new();
    let order = ctx.parse(ORDER);

    assert_eq!(ctx.value(&order, "$.id").unwrap(), SqlValue::varchar("1001"));
    assert_eq!(
        ctx.value(&order, "$.customer.name").unwrap(),
        SqlValue::varchar("Ada")
    );
    assert_eq!(
        ctx.value(&order, "$.items[0].price").unwrap(),
        SqlValue::varchar("9.99")
    );
    assert_eq!(ctx.value(&order, "$.customer.email").unwrap(), SqlValue::Null);
    assert_eq!(ctx.value(&order, "$.items").unwrap(), SqlValue::Null);
    assert_eq!(ctx.value(&order, "$.shipped").unwrap(), SqlValue::varchar("false"));

    let tags = ctx
        .call(
            "json_value_array",
            vec![order.clone(), SqlValue::varchar("$.customer.tags")],
        )
        .unwrap();
    assert_eq!(
        tags,
        SqlValue::Array(vec![SqlValue::varchar("vip"), SqlValue::varchar("beta")])
    );

    let skus: Vec<SqlValue> = match ctx
        .call("json_query_array", vec![order.clone(), SqlValue::varchar("$.items")])
        .unwrap()
    {
        SqlValue::Array(items) => items
            .iter()
            .map(|item| ctx.value(item, "$.sku").unwrap())
            .collect(),
        other => panic!("expected an array, got {:?}", other),
    };
    assert_eq!(skus, vec![SqlValue::varchar("A-1"), SqlValue::varchar("B-7")]);
}

#[test]
fn test_typed_extraction_from_order() {
    let ctx = TestContext::new();
    let order = ctx.parse(ORDER);
    let qty = ctx.query(&order, "$.items[1].qty").unwrap();
    assert_eq!(ctx.call("integer", vec![qty]).unwrap(), SqlValue::Integer(1));

    let price = ctx.query(&order, "$.items[0].price").unwrap();
    assert_eq!(
        ctx.call("double", vec![price.clone()]).unwrap(),
        SqlValue::Double(9.99)
    );
    assert_eq!(ctx.call("lax_integer", vec![price.clone()]).unwrap(), SqlValue::Integer(10));
    assert!(matches!(
        ctx.call("integer", vec![price.clone()]),
        Err(SpinelJsonError::Conversion(_))
    ));
    assert_eq!(ctx.safe_call("integer", vec![price]), SqlValue::Null);
}

#[test]
fn test_edit_order_workflow() {
    let ctx = TestContext::new();
    let order = ctx.parse(ORDER);

    let edited = ctx
        .set(&order, "$.shipped", SqlValue::Bool(true))
        .and_then(|doc| ctx.set(&doc, "$.items[2]", ctx.parse(r#"{"sku":"C-3","qty":5}"#)))
        .and_then(|doc| ctx.remove(&doc, "$.notes"))
        .and_then(|doc| {
            ctx.call(
                "json_array_append",
                vec![doc, SqlValue::varchar("$.customer.tags"), SqlValue::varchar("new")],
            )
        })
        .and_then(|doc| ctx.call("json_strip_nulls", vec![doc]))
        .unwrap();

    assert_eq!(ctx.value(&edited, "$.shipped").unwrap(), SqlValue::varchar("true"));
    assert_eq!(ctx.value(&edited, "$.items[2].sku").unwrap(), SqlValue::varchar("C-3"));
    assert_eq!(ctx.query(&edited, "$.notes").unwrap(), SqlValue::Null);
    assert_eq!(
        ctx.to_json_string(ctx.query(&edited, "$.customer").unwrap()),
        r#"{"name":"Ada","tags":["vip","beta","new"]}"#
    );

    // The source document is untouched and still shares its item objects.
    assert_eq!(ctx.value(&order, "$.shipped").unwrap(), SqlValue::varchar("false"));
    let before = as_json(&order).get("items").unwrap().get_index(0).unwrap();
    let after_set = ctx.set(&order, "$.shipped", SqlValue::Bool(true)).unwrap();
    let after = as_json(&after_set).get("items").unwrap().get_index(0).unwrap();
    assert!(before.shares_allocation(after));
}

#[test]
fn test_number_fidelity_through_functions() {
    let ctx = TestContext::new();
    let numbers = ctx.parse(NUMBERS);

    assert_eq!(
        ctx.to_json_string(numbers.clone()),
        r#"{"small":-7,"safe":9007199254740992,"i64_max":9223372036854775807,"u64_max":18446744073709551615,"fraction":0.1,"sci":1.5e+300}"#
    );
    assert_eq!(
        ctx.value(&numbers, "$.u64_max").unwrap(),
        SqlValue::varchar("18446744073709551615")
    );
    let u64_max = ctx.query(&numbers, "$.u64_max").unwrap();
    assert_eq!(
        ctx.call("ubigint", vec![u64_max.clone()]).unwrap(),
        SqlValue::UBigInt(u64::MAX)
    );
    assert!(matches!(
        ctx.call("bigint", vec![u64_max.clone()]),
        Err(SpinelJsonError::Conversion(_))
    ));
    assert!(matches!(
        ctx.call_args(
            "double",
            &[
                SqlArg::positional(u64_max),
                SqlArg::named("wide_number_mode", "exact"),
            ],
        ),
        Err(SpinelJsonError::Precision(_))
    ));

    let stringified = ctx
        .call_args(
            "to_json",
            &[
                SqlArg::positional(SqlValue::BigInt(i64::MAX)),
                SqlArg::named("stringify_wide_numbers", true),
            ],
        )
        .unwrap();
    assert_eq!(stringified.to_string(), r#""9223372036854775807""#);
}

#[test]
fn test_text_input_renders_text() {
    let ctx = TestContext::new();
    let text = SqlValue::varchar(ODD_KEYS);

    assert_eq!(ctx.query(&text, r#"$["a.b"]"#).unwrap(), SqlValue::varchar("1"));
    assert_eq!(
        ctx.query(&text, r#"$."with space".x"#).unwrap(),
        SqlValue::varchar("[10,20]")
    );
    assert_eq!(
        ctx.value(&text, "$['with space'].x[1]").unwrap(),
        SqlValue::varchar("20")
    );
    assert_eq!(ctx.value(&text, r#"$[""]"#).unwrap(), SqlValue::varchar("empty"));
    // Invalid text is NULL rather than an error.
    assert_eq!(
        ctx.query(&SqlValue::varchar("{oops"), "$").unwrap(),
        SqlValue::Null
    );
    // Invalid paths are always errors.
    assert!(matches!(
        ctx.query(&text, "$.a..b"),
        Err(SpinelJsonError::Compile { .. })
    ));
}

#[test]
fn test_build_documents_from_sql_values() {
    let ctx = TestContext::new();
    let built = ctx
        .call(
            "json_object",
            vec![
                SqlValue::varchar("id"),
                SqlValue::BigInt(7),
                SqlValue::varchar("tags"),
                ctx.call("json_array", vec![SqlValue::varchar("a"), SqlValue::Null])
                    .unwrap(),
            ],
        )
        .unwrap();
    assert_eq!(ctx.to_json_string(built.clone()), r#"{"id":7,"tags":["a",null]}"#);
    assert_eq!(
        ctx.call("json_type", vec![built]).unwrap(),
        SqlValue::varchar("object")
    );
}

#[test]
fn test_large_array_document() {
    let ctx = TestContext::new();
    let doc = ctx.parse(&array_of_objects(1000));
    assert_eq!(ctx.value(&doc, "$[999].i").unwrap(), SqlValue::varchar("999"));
    let evens = ctx
        .call("lax_bool", vec![ctx.query(&doc, "$[998].even").unwrap()])
        .unwrap();
    assert_eq!(evens, SqlValue::Bool(true));

    let edited = ctx.remove(&doc, "$[0]").unwrap();
    assert_eq!(ctx.value(&edited, "$[0].i").unwrap(), SqlValue::varchar("1"));
    assert_eq!(ctx.value(&edited, "$[999]").unwrap(), SqlValue::Null);
}

#[test]
fn test_limits_from_config() {
    let mut config = Config::default();
    config.limits.max_path_steps = 2;
    config.limits.max_depth = 3;
    let ctx = TestContext::with_config(config);

    let doc = ctx.parse(r#"{"a":{"b":1}}"#);
    assert_eq!(ctx.value(&doc, "$.a.b").unwrap(), SqlValue::varchar("1"));
    assert!(matches!(
        ctx.value(&doc, "$.a.b.c"),
        Err(SpinelJsonError::Compile { .. })
    ));
    assert!(matches!(
        ctx.call("parse_json", vec![SqlValue::varchar("[[[[1]]]]")]),
        Err(SpinelJsonError::Parse { .. })
    ));
}
