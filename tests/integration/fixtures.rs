// tests/integration/fixtures.rs

//! Shared documents for the integration tests.

/// An order record with nested arrays, objects and a null field.
pub const ORDER: &str = r#"{
  "id": 1001,
  "customer": {"name": "Ada", "email": null, "tags": ["vip", "beta"]},
  "items": [
    {"sku": "A-1", "qty": 2, "price": 9.99},
    {"sku": "B-7", "qty": 1, "price": 120}
  ],
  "shipped": false,
  "notes": null
}"#;

/// Numbers at the edges of the exact domains.
pub const NUMBERS: &str = r#"{
  "small": -7,
  "safe": 9007199254740992,
  "i64_max": 9223372036854775807,
  "u64_max": 18446744073709551615,
  "fraction": 0.1,
  "sci": 1.5e300
}"#;

/// Keys that only bracket-quoted paths can reach.
pub const ODD_KEYS: &str = r#"{"a.b": 1, "with space": {"x": [10, 20]}, "": "empty"}"#;

/// Generates an array document of `n` small objects.
pub fn array_of_objects(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"i":{i},"even":{}}}"#, i % 2 == 0))
        .collect();
    format!("[{}]", items.join(","))
}
