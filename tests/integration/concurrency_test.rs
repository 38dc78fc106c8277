// tests/integration/concurrency_test.rs

//! One engine shared across threads, and the compiled-path cache behind it.

use super::fixtures::ORDER;
use super::test_helpers::TestContext;
use spineljson::config::Config;
use spineljson::core::{Engine, SqlArg, SqlValue};
use std::sync::Arc;
use std::thread;

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
    assert_send_sync::<SqlValue>();
}

#[test]
fn test_concurrent_reads_and_edits() {
    let ctx = TestContext::new();
    let order = ctx.parse(ORDER);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let engine = Arc::clone(&ctx.engine);
            let order = order.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let path = format!("$.items[{}].qty", i % 2);
                    let qty = engine
                        .call(
                            "json_value",
                            &[
                                SqlArg::positional(order.clone()),
                                SqlArg::positional(SqlValue::varchar(path)),
                            ],
                        )
                        .unwrap();
                    assert!(qty == SqlValue::varchar("2") || qty == SqlValue::varchar("1"));

                    let edited = engine
                        .call(
                            "json_set",
                            &[
                                SqlArg::positional(order.clone()),
                                SqlArg::positional(SqlValue::varchar(format!("$.worker_{worker}"))),
                                SqlArg::positional(i as i64),
                            ],
                        )
                        .unwrap();
                    let read_back = engine
                        .call(
                            "json_value",
                            &[
                                SqlArg::positional(edited),
                                SqlArg::positional(SqlValue::varchar(format!("$.worker_{worker}"))),
                            ],
                        )
                        .unwrap();
                    assert_eq!(read_back, SqlValue::varchar(i.to_string()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    // The shared input never changed.
    assert_eq!(ctx.query(&order, "$.worker_0").unwrap(), SqlValue::Null);
}

#[test]
fn test_path_cache_fills_and_is_bounded() {
    let mut config = Config::default();
    config.limits.path_cache_capacity = 4;
    let ctx = TestContext::with_config(config);
    let doc = ctx.parse(r#"{"a":1,"b":2,"c":3,"d":4,"e":5,"f":6}"#);
    let cache = ctx.engine.path_cache();
    assert_eq!(cache.capacity(), 4);
    assert!(cache.is_empty());

    ctx.value(&doc, "$.a").unwrap();
    ctx.value(&doc, "$.a").unwrap();
    assert_eq!(cache.len(), 1);

    for key in ["b", "c", "d", "e", "f"] {
        ctx.value(&doc, &format!("$.{key}")).unwrap();
    }
    assert_eq!(cache.len(), 4);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_path_cache_skips_invalid_paths() {
    let ctx = TestContext::new();
    let doc = ctx.parse("{}");
    assert!(ctx.value(&doc, "$[").is_err());
    assert!(ctx.engine.path_cache().is_empty());
}

#[test]
fn test_disabled_path_cache_still_compiles() {
    let mut config = Config::default();
    config.limits.path_cache_capacity = 0;
    let ctx = TestContext::with_config(config);
    let doc = ctx.parse(r#"{"a":[1,2]}"#);
    assert_eq!(ctx.value(&doc, "$.a[1]").unwrap(), SqlValue::varchar("2"));
    assert_eq!(ctx.engine.path_cache().capacity(), 0);
    assert!(ctx.engine.path_cache().is_empty());
}
