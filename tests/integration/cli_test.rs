// tests/integration/cli_test.rs

//! Expression lines evaluated the way the binary evaluates them.

use super::fixtures::ORDER;
use super::test_helpers::TestContext;
use spineljson::cli::{eval_str, run_line};
use spineljson::core::SqlValue;

fn quoted(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[test]
fn test_cli_session() {
    let ctx = TestContext::new();
    let doc = format!("JSON {}", quoted(ORDER));

    let lines = [
        (format!("json_value({doc}, '$.customer.name')"), "Ada"),
        (format!("json_type(json_query({doc}, '$.items'))"), "array"),
        (
            format!("to_json_string(json_remove({doc}, '$.items', '$.customer', '$.notes'))"),
            r#"{"id":1001,"shipped":false}"#,
        ),
        (
            format!("SAFE.integer(json_query({doc}, '$.items[0].price'))"),
            "NULL",
        ),
        (
            format!("lax_integer(json_query({doc}, '$.items[0].price'))"),
            "10",
        ),
        (
            format!("json_value_array({doc}, '$.customer.tags')"),
            r#"["vip", "beta"]"#,
        ),
    ];
    for (line, expected) in lines {
        let (output, ok) = run_line(&ctx.engine, &line);
        assert!(ok, "line {} failed: {}", line, output);
        assert_eq!(output, expected, "line {}", line);
    }
}

#[test]
fn test_cli_error_lines() {
    let ctx = TestContext::new();
    let cases = [
        ("json_value(JSON '{', '$')", "ERROR: Invalid JSON at position 1"),
        ("json_value(JSON '{}', 'a')", "ERROR: Invalid JSONPath 'a'"),
        ("nope()", "ERROR: Unknown function"),
        ("json_query(JSON '{}')", "ERROR: Wrong number of arguments for 'JSON_QUERY'"),
        ("json_value(", "ERROR: Syntax error"),
    ];
    for (line, prefix) in cases {
        let (output, ok) = run_line(&ctx.engine, line);
        assert!(!ok, "line {} should fail", line);
        assert!(output.starts_with(prefix), "line {} printed {}", line, output);
    }
}

#[test]
fn test_cli_literal_round_trip() {
    let ctx = TestContext::new();
    let result = eval_str(
        &ctx.engine,
        "parse_json(to_json_string(STRUCT([1, 2] AS xs, DATE '2024-02-29' AS day, 'q\\'s' AS s)))",
    )
    .unwrap();
    assert_eq!(
        result.to_string(),
        r#"{"xs":[1,2],"day":"2024-02-29","s":"q's"}"#
    );
    assert_eq!(
        eval_str(&ctx.engine, "json_value(JSON '[true]', '$[0]')").unwrap(),
        SqlValue::varchar("true")
    );
}
