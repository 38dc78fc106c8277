// src/core/value/number.rs

//! Exact-precision storage for JSON numbers.
//!
//! A literal is kept as `i64`/`u64` when it is an integer in range, as `f64` when the
//! nearest double reproduces it, and verbatim ("wide") otherwise. `Decimal` does the
//! base-10 bookkeeping needed to decide between those and to convert across them.

use crate::core::SpinelJsonError;
use std::fmt;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

/// Largest integer magnitude a double holds exactly (2^53).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_992;

/// How a number that cannot be stored without loss is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WideNumberMode {
    /// Fail with a precision error.
    #[default]
    Exact,
    /// Round to the nearest representable value; fail only when none exists.
    Round,
}

/// A finite base-10 number: `digits * 10^exponent`, with a sign.
///
/// `digits` never has leading or trailing zeros, so equal values have equal
/// representations and the derived `PartialEq` is numeric equality. Zero is the
/// empty digit string and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Decimal {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`, also accepting `.5` and `5.`.
    /// Returns `None` for anything else, including surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let mut idx = 0;
        let mut negative = false;
        match bytes.first() {
            Some(b'-') => {
                negative = true;
                idx = 1;
            }
            Some(b'+') => idx = 1,
            _ => {}
        }

        let mut mantissa = String::new();
        let mut int_digits = 0usize;
        while let Some(c) = bytes.get(idx).filter(|c| c.is_ascii_digit()) {
            mantissa.push(*c as char);
            int_digits += 1;
            idx += 1;
        }
        let mut frac_digits = 0i64;
        if bytes.get(idx) == Some(&b'.') {
            idx += 1;
            while let Some(c) = bytes.get(idx).filter(|c| c.is_ascii_digit()) {
                mantissa.push(*c as char);
                frac_digits += 1;
                idx += 1;
            }
        }
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        let mut exponent = 0i64;
        if matches!(bytes.get(idx), Some(b'e' | b'E')) {
            idx += 1;
            let mut exp_negative = false;
            match bytes.get(idx) {
                Some(b'-') => {
                    exp_negative = true;
                    idx += 1;
                }
                Some(b'+') => idx += 1,
                _ => {}
            }
            let start = idx;
            while let Some(c) = bytes.get(idx).filter(|c| c.is_ascii_digit()) {
                exponent = exponent
                    .saturating_mul(10)
                    .saturating_add(i64::from(*c - b'0'));
                idx += 1;
            }
            if idx == start {
                return None;
            }
            if exp_negative {
                exponent = -exponent;
            }
        }
        if idx != bytes.len() {
            return None;
        }

        Some(Self::from_parts(
            negative,
            &mantissa,
            exponent.saturating_sub(frac_digits),
        ))
    }

    fn from_parts(negative: bool, mantissa: &str, exponent: i64) -> Self {
        let trimmed = mantissa.trim_start_matches('0');
        let significant = trimmed.trim_end_matches('0');
        if significant.is_empty() {
            return Self::zero();
        }
        let dropped = (trimmed.len() - significant.len()) as i64;
        Self {
            negative,
            digits: significant.to_string(),
            exponent: exponent.saturating_add(dropped),
        }
    }

    pub fn from_i128(value: i128) -> Self {
        Self::from_parts(value < 0, &value.unsigned_abs().to_string(), 0)
    }

    /// The shortest decimal that round-trips to `value`. `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut buffer = ryu::Buffer::new();
        Self::parse(buffer.format_finite(value))
    }

    /// The shortest decimal that round-trips to `value` as a single-precision float.
    pub fn from_f32(value: f32) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut buffer = ryu::Buffer::new();
        Self::parse(buffer.format_finite(value))
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_integer(&self) -> bool {
        self.digits.is_empty() || self.exponent >= 0
    }

    /// Count of digits left of the decimal point (may be zero or negative).
    fn integer_digits(&self) -> i64 {
        (self.digits.len() as i64).saturating_add(self.exponent)
    }

    /// The exact integer value, if this is an integer that fits `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        if !self.is_integer() {
            return None;
        }
        if self.is_zero() {
            return Some(0);
        }
        if self.integer_digits() > 38 {
            return None;
        }
        let mut value = accumulate(&self.digits)?;
        for _ in 0..self.exponent {
            value = value.checked_mul(10)?;
        }
        Some(if self.negative { -value } else { value })
    }

    /// Rounds to an integer, halves away from zero (`2.5 -> 3`, `-2.5 -> -3`).
    pub fn round_half_away_from_zero(&self) -> Option<i128> {
        if self.is_integer() {
            return self.to_i128();
        }
        let integer_digits = self.integer_digits();
        let (head, next) = if integer_digits <= 0 {
            let next = if integer_digits == 0 {
                self.digits.as_bytes().first().copied().unwrap_or(b'0')
            } else {
                b'0'
            };
            ("", next)
        } else {
            // A fractional value keeps at least one digit right of the point.
            let split = integer_digits as usize;
            let next = self.digits.as_bytes().get(split).copied().unwrap_or(b'0');
            (&self.digits[..split], next)
        };
        if head.len() > 38 {
            return None;
        }
        let mut value = accumulate(head)?;
        if next >= b'5' {
            value = value.checked_add(1)?;
        }
        Some(if self.negative { -value } else { value })
    }

    /// The nearest double (round-to-nearest-even); may be infinite.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let magnitude = self.integer_digits();
        let value = if magnitude > 400 {
            f64::INFINITY
        } else if magnitude < -400 {
            0.0
        } else {
            format!("{}e{}", self.digits, self.exponent)
                .parse::<f64>()
                .unwrap_or(f64::NAN)
        };
        if self.negative { -value } else { value }
    }

    /// The nearest single-precision float; may be infinite.
    pub fn to_f32(&self) -> f32 {
        if self.is_zero() {
            return 0.0;
        }
        let magnitude = self.integer_digits();
        let value = if magnitude > 60 {
            f32::INFINITY
        } else if magnitude < -60 {
            0.0
        } else {
            format!("{}e{}", self.digits, self.exponent)
                .parse::<f32>()
                .unwrap_or(f32::NAN)
        };
        if self.negative { -value } else { value }
    }

    /// The double holding this value without loss of precision, if there is one.
    ///
    /// A value qualifies when it is the shortest round-trip text of its nearest
    /// double, or when it is an integer that double holds exactly.
    pub fn exact_f64(&self) -> Option<f64> {
        let value = self.to_f64();
        if !value.is_finite() {
            return None;
        }
        if Decimal::from_f64(value).as_ref() == Some(self) {
            return Some(value);
        }
        if self.is_integer() && value.abs() < 1.0e38 && self.to_i128() == Some(value as i128) {
            return Some(value);
        }
        None
    }

    /// Single-precision counterpart of [`Decimal::exact_f64`].
    pub fn exact_f32(&self) -> Option<f32> {
        let value = self.to_f32();
        if !value.is_finite() {
            return None;
        }
        if Decimal::from_f32(value).as_ref() == Some(self) {
            return Some(value);
        }
        if self.is_integer() && value.abs() < 1.0e38 && self.to_i128() == Some(value as i128) {
            return Some(value);
        }
        None
    }

    /// Positional text between `1e-5` and `1e15`, `d.ddde+XX` outside it.
    pub fn to_canonical_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        let scientific = self.integer_digits() - 1;
        if (-5..15).contains(&scientific) {
            write_positional(&mut out, &self.digits, self.exponent);
        } else {
            let (first, rest) = self.digits.split_at(1);
            out.push_str(first);
            if !rest.is_empty() {
                out.push('.');
                out.push_str(rest);
            }
            out.push('e');
            out.push(if scientific < 0 { '-' } else { '+' });
            let magnitude = scientific.unsigned_abs();
            if magnitude < 10 {
                out.push('0');
            }
            out.push_str(itoa::Buffer::new().format(magnitude));
        }
        out
    }
}

/// Positional text (`1200`, `0.015`); astronomically scaled values fall back to canonical form.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.integer_digits().abs() > 1000 {
            return f.write_str(&self.to_canonical_string());
        }
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        write_positional(&mut out, &self.digits, self.exponent);
        f.write_str(&out)
    }
}

fn accumulate(digits: &str) -> Option<i128> {
    let mut value: i128 = 0;
    for b in digits.bytes() {
        value = value.checked_mul(10)?.checked_add(i128::from(b - b'0'))?;
    }
    Some(value)
}

fn write_positional(out: &mut String, digits: &str, exponent: i64) {
    let point = digits.len() as i64 + exponent;
    if point <= 0 {
        out.push_str("0.");
        for _ in 0..-point {
            out.push('0');
        }
        out.push_str(digits);
    } else if point as usize >= digits.len() {
        out.push_str(digits);
        for _ in digits.len()..point as usize {
            out.push('0');
        }
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        out.push_str(whole);
        out.push('.');
        out.push_str(fraction);
    }
}

/// Formats a DOUBLE the way the engine renders it as text.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    Decimal::from_f64(value)
        .map(|d| d.to_canonical_string())
        .unwrap_or_default()
}

/// Formats a FLOAT using its own shortest digits rather than those of the widened double.
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    Decimal::from_f32(value)
        .map(|d| d.to_canonical_string())
        .unwrap_or_default()
}

/// A literal outside the exact domains, kept verbatim until a conversion decides how to round it.
#[derive(Debug, PartialEq, Eq)]
pub struct WideNumber {
    literal: Box<str>,
    value: Decimal,
}

impl WideNumber {
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }
}

/// The numeric payload of a JSON number.
#[derive(Debug, Clone)]
pub enum ExactNumber {
    Int(i64),
    /// Only used above `i64::MAX`.
    UInt(u64),
    /// Always finite.
    Double(f64),
    Wide(Arc<WideNumber>),
}

impl ExactNumber {
    pub fn from_u64(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => ExactNumber::Int(v),
            Err(_) => ExactNumber::UInt(value),
        }
    }

    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(ExactNumber::Double(value))
    }

    pub fn from_i128(value: i128) -> Option<Self> {
        if let Ok(v) = i64::try_from(value) {
            return Some(ExactNumber::Int(v));
        }
        u64::try_from(value).ok().map(ExactNumber::UInt)
    }

    /// Classifies a numeric literal; `mode` of `None` keeps wide literals verbatim.
    pub fn from_literal(
        literal: &str,
        mode: Option<WideNumberMode>,
    ) -> Result<Self, SpinelJsonError> {
        let value = Decimal::parse(literal).ok_or_else(|| {
            SpinelJsonError::InvalidArgument(format!("'{literal}' is not a numeric literal"))
        })?;
        Self::from_decimal(value, literal, mode)
    }

    pub fn from_decimal(
        value: Decimal,
        literal: &str,
        mode: Option<WideNumberMode>,
    ) -> Result<Self, SpinelJsonError> {
        if let Some(number) = value.to_i128().and_then(ExactNumber::from_i128) {
            return Ok(number);
        }
        if let Some(d) = value.exact_f64() {
            return Ok(ExactNumber::Double(d));
        }
        match mode {
            Some(WideNumberMode::Exact) => Err(SpinelJsonError::Precision(format!(
                "number {literal} cannot be stored without loss of precision"
            ))),
            Some(WideNumberMode::Round) => {
                let rounded = value.to_f64();
                if rounded.is_finite() {
                    Ok(ExactNumber::Double(rounded))
                } else {
                    Err(SpinelJsonError::Precision(format!(
                        "number {literal} is outside the range of DOUBLE"
                    )))
                }
            }
            None => Ok(ExactNumber::Wide(Arc::new(WideNumber {
                literal: literal.trim().into(),
                value,
            }))),
        }
    }

    pub fn to_decimal(&self) -> Decimal {
        match self {
            ExactNumber::Int(v) => Decimal::from_i128(i128::from(*v)),
            ExactNumber::UInt(v) => Decimal::from_i128(i128::from(*v)),
            ExactNumber::Double(d) => Decimal::from_f64(*d).unwrap_or_default(),
            ExactNumber::Wide(w) => w.value.clone(),
        }
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, ExactNumber::Wide(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            ExactNumber::Int(v) => *v == 0,
            ExactNumber::UInt(_) => false,
            ExactNumber::Double(d) => *d == 0.0,
            ExactNumber::Wide(w) => w.value.is_zero(),
        }
    }

    /// Converts to DOUBLE, applying `mode` when the value does not fit exactly.
    pub fn to_f64(&self, mode: WideNumberMode) -> Result<f64, SpinelJsonError> {
        if let ExactNumber::Double(d) = self {
            return Ok(*d);
        }
        let decimal = self.to_decimal();
        if let Some(d) = decimal.exact_f64() {
            return Ok(d);
        }
        let rounded = decimal.to_f64();
        match mode {
            WideNumberMode::Exact => Err(SpinelJsonError::Precision(format!(
                "{self} cannot be converted to DOUBLE without loss of precision"
            ))),
            WideNumberMode::Round if rounded.is_finite() => Ok(rounded),
            WideNumberMode::Round => Err(SpinelJsonError::Precision(format!(
                "{self} is outside the range of DOUBLE"
            ))),
        }
    }

    /// Converts to FLOAT, applying `mode` when the value does not fit exactly.
    pub fn to_f32(&self, mode: WideNumberMode) -> Result<f32, SpinelJsonError> {
        let decimal = self.to_decimal();
        if let Some(f) = decimal.exact_f32() {
            return Ok(f);
        }
        let rounded = decimal.to_f32();
        match mode {
            WideNumberMode::Exact => Err(SpinelJsonError::Precision(format!(
                "{self} cannot be converted to FLOAT without loss of precision"
            ))),
            WideNumberMode::Round if rounded.is_finite() => Ok(rounded),
            WideNumberMode::Round => Err(SpinelJsonError::Precision(format!(
                "{self} is outside the range of FLOAT"
            ))),
        }
    }
}

impl PartialEq for ExactNumber {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExactNumber::Int(a), ExactNumber::Int(b)) => a == b,
            (ExactNumber::UInt(a), ExactNumber::UInt(b)) => a == b,
            (ExactNumber::Double(a), ExactNumber::Double(b)) => a == b,
            _ => self.to_decimal() == other.to_decimal(),
        }
    }
}

impl fmt::Display for ExactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExactNumber::Int(v) => f.write_str(itoa::Buffer::new().format(*v)),
            ExactNumber::UInt(v) => f.write_str(itoa::Buffer::new().format(*v)),
            ExactNumber::Double(d) => f.write_str(&format_double(*d)),
            ExactNumber::Wide(w) => f.write_str(&w.literal),
        }
    }
}
