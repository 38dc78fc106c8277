// tests/unit_number_test.rs

use spineljson::core::SpinelJsonError;
use spineljson::core::value::{
    Decimal, ExactNumber, JsonValue, WideNumberMode, format_double, format_float,
};

fn dec(text: &str) -> Decimal {
    Decimal::parse(text).unwrap()
}

#[test]
fn test_decimal_parse_normalizes() {
    assert_eq!(dec("1.200"), dec("12e-1"));
    assert_eq!(dec("0012"), dec("1.2E1"));
    assert_eq!(dec("-0"), Decimal::zero());
    assert!(!dec("-0.000").is_negative());
    assert!(dec("-3").is_negative());
}

#[test]
fn test_decimal_parse_rejects_garbage() {
    for text in ["", " 1", "1 ", "abc", "1e", "--1", "1.2.3", "e5", "."] {
        assert!(Decimal::parse(text).is_none(), "{:?} should not parse", text);
    }
}

#[test]
fn test_decimal_integer_checks() {
    assert!(dec("1e3").is_integer());
    assert!(!dec("1.5").is_integer());
    assert_eq!(dec("1e3").to_i128(), Some(1000));
    assert_eq!(dec("-42").to_i128(), Some(-42));
    assert_eq!(dec("1.5").to_i128(), None);
    assert_eq!(dec("1e40").to_i128(), None);
}

#[test]
fn test_decimal_round_half_away_from_zero() {
    let cases = [
        ("2.5", 3),
        ("-2.5", -3),
        ("2.4", 2),
        ("2.6", 3),
        ("0.5", 1),
        ("-0.5", -1),
        ("-0.49", 0),
        ("0.05", 0),
        ("7", 7),
        ("1.5e1", 15),
    ];
    for (text, expected) in cases {
        assert_eq!(
            dec(text).round_half_away_from_zero(),
            Some(expected),
            "rounding {}",
            text
        );
    }
}

#[test]
fn test_decimal_canonical_text() {
    let cases = [
        ("0", "0"),
        ("-12.5", "-12.5"),
        ("123456789012345", "123456789012345"),
        ("1e15", "1e+15"),
        ("0.00001", "0.00001"),
        ("0.000001", "1e-06"),
        ("1.5e-7", "1.5e-07"),
        ("1e100", "1e+100"),
        ("-2.5e20", "-2.5e+20"),
    ];
    for (text, expected) in cases {
        assert_eq!(dec(text).to_canonical_string(), expected, "canonical {}", text);
    }
}

#[test]
fn test_decimal_display_is_positional() {
    assert_eq!(dec("1e20").to_string(), "100000000000000000000");
    assert_eq!(dec("1.5e-3").to_string(), "0.0015");
    assert_eq!(dec("-120").to_string(), "-120");
}

#[test]
fn test_format_double() {
    assert_eq!(format_double(f64::NAN), "NaN");
    assert_eq!(format_double(f64::INFINITY), "Infinity");
    assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_double(0.0), "0");
    assert_eq!(format_double(0.1), "0.1");
    assert_eq!(format_double(100.0), "100");
    assert_eq!(format_double(1e21), "1e+21");
    assert_eq!(format_double(1.8446744073709552e19), "1.8446744073709552e+19");
}

#[test]
fn test_format_float_uses_single_precision_digits() {
    assert_eq!(format_float(0.1f32), "0.1");
    assert_eq!(format_float(f32::NAN), "NaN");
    assert_eq!(format_float(3.25f32), "3.25");
}

#[test]
fn test_exact_number_to_f64_modes() {
    let umax = ExactNumber::UInt(u64::MAX);
    assert!(matches!(
        umax.to_f64(WideNumberMode::Exact),
        Err(SpinelJsonError::Precision(_))
    ));
    assert_eq!(
        umax.to_f64(WideNumberMode::Round).unwrap(),
        1.8446744073709552e19
    );

    let safe = ExactNumber::Int(9_007_199_254_740_992);
    assert_eq!(
        safe.to_f64(WideNumberMode::Exact).unwrap(),
        9_007_199_254_740_992.0
    );
    let unsafe_int = ExactNumber::Int(9_007_199_254_740_993);
    assert!(unsafe_int.to_f64(WideNumberMode::Exact).is_err());
}

#[test]
fn test_exact_number_to_f32_modes() {
    let n = ExactNumber::Int(16_777_217);
    assert!(n.to_f32(WideNumberMode::Exact).is_err());
    assert_eq!(n.to_f32(WideNumberMode::Round).unwrap(), 16_777_216.0);

    let huge = ExactNumber::Double(1e300);
    assert!(huge.to_f32(WideNumberMode::Round).is_err());
}

#[test]
fn test_exact_number_equality_across_representations() {
    assert_eq!(ExactNumber::Int(1), ExactNumber::Double(1.0));
    assert_eq!(
        ExactNumber::from_literal("1e2", None).unwrap(),
        ExactNumber::Int(100)
    );
    assert_ne!(ExactNumber::Int(1), ExactNumber::Double(1.5));
}

#[test]
fn test_exact_number_from_literal() {
    assert!(matches!(
        ExactNumber::from_literal("42", Some(WideNumberMode::Exact)).unwrap(),
        ExactNumber::Int(42)
    ));
    let wide = ExactNumber::from_literal("1e400", None).unwrap();
    assert!(wide.is_wide());
    assert_eq!(wide.to_string(), "1e400");
    assert!(ExactNumber::from_literal("abc", None).is_err());
}

#[test]
fn test_wide_number_mode_parsing() {
    assert_eq!("exact".parse::<WideNumberMode>().unwrap(), WideNumberMode::Exact);
    assert_eq!("ROUND".parse::<WideNumberMode>().unwrap(), WideNumberMode::Round);
    assert!("fast".parse::<WideNumberMode>().is_err());
    assert_eq!(WideNumberMode::Round.to_string(), "round");
    assert_eq!(WideNumberMode::default(), WideNumberMode::Exact);
}

#[test]
fn test_writer_escapes_strings() {
    let value = JsonValue::from("a\"b\\\n\u{01}é");
    assert_eq!(value.to_string(), "\"a\\\"b\\\\\\n\\u0001é\"");
}

#[test]
fn test_writer_pretty() {
    let value: JsonValue = r#"{"a":[1,2],"b":{},"c":[]}"#.parse().unwrap();
    assert_eq!(
        value.to_pretty_string(2),
        "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": {},\n  \"c\": []\n}"
    );
    assert_eq!(JsonValue::from(5i64).to_pretty_string(4), "5");
}

#[test]
fn test_object_equality_ignores_order() {
    let a: JsonValue = r#"{"x":1,"y":[1,2]}"#.parse().unwrap();
    let b: JsonValue = r#"{"y":[1,2],"x":1.0}"#.parse().unwrap();
    let c: JsonValue = r#"{"y":[2,1],"x":1}"#.parse().unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}
