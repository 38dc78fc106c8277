// src/core/value/parser.rs

//! A strict RFC 8259 parser producing `JsonValue` trees.
//!
//! The parser is a single forward pass over the input bytes. Every error carries the
//! byte offset at which it was detected. Number literals are classified as they are
//! read, so the wide-number policy is applied before the tree is ever returned.

use super::number::{ExactNumber, WideNumberMode};
use super::{JsonObject, JsonValue};
use crate::core::SpinelJsonError;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// `None` keeps numbers that do not fit exactly as verbatim wide literals.
    pub wide_number_mode: Option<WideNumberMode>,
    /// Maximum nesting of arrays and objects.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            wide_number_mode: Some(WideNumberMode::Exact),
            max_depth: 512,
        }
    }
}

impl ParseOptions {
    pub fn with_mode(mode: Option<WideNumberMode>, max_depth: usize) -> Self {
        Self {
            wide_number_mode: mode,
            max_depth,
        }
    }
}

/// Parses a complete JSON text. Only whitespace may follow the value.
pub fn parse(text: &str, options: &ParseOptions) -> Result<JsonValue, SpinelJsonError> {
    Parser::new(text, options).parse()
}

struct Parser<'a> {
    text: &'a str,
    buf: &'a [u8],
    idx: usize,
    depth: usize,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            text,
            buf: text.as_bytes(),
            idx: 0,
            depth: 0,
            options,
        }
    }

    fn parse(&mut self) -> Result<JsonValue, SpinelJsonError> {
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.idx < self.buf.len() {
            return Err(self.error("unexpected trailing characters"));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<JsonValue, SpinelJsonError> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'n') => self.parse_keyword("null", JsonValue::Null),
            Some(b't') => self.parse_keyword("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_keyword("false", JsonValue::Bool(false)),
            Some(b'"') => Ok(JsonValue::String(self.parse_string()?.into())),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error("expected a JSON value")),
        }
    }

    fn parse_keyword(
        &mut self,
        keyword: &str,
        value: JsonValue,
    ) -> Result<JsonValue, SpinelJsonError> {
        if self.buf[self.idx..].starts_with(keyword.as_bytes()) {
            self.idx += keyword.len();
            Ok(value)
        } else {
            Err(self.error("expected a JSON value"))
        }
    }

    fn parse_array(&mut self) -> Result<JsonValue, SpinelJsonError> {
        self.enter()?;
        self.step();
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.check_next(b']') {
            self.depth -= 1;
            return Ok(JsonValue::array(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.next()? {
                b',' => continue,
                b']' => break,
                _ => return Err(self.error_at(self.idx - 1, "expected ',' or ']'")),
            }
        }
        self.depth -= 1;
        Ok(JsonValue::array(items))
    }

    fn parse_object(&mut self) -> Result<JsonValue, SpinelJsonError> {
        self.enter()?;
        self.step();
        let mut map = JsonObject::new();
        self.skip_whitespace();
        if self.check_next(b'}') {
            self.depth -= 1;
            return Ok(JsonValue::object(map));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error("expected a string key"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if !self.check_next(b':') {
                return Err(self.error("expected ':'"));
            }
            self.skip_whitespace();
            let value = self.parse_value()?;
            // Duplicate keys: the first occurrence keeps both its value and its position.
            map.entry(key).or_insert(value);
            self.skip_whitespace();
            match self.next()? {
                b',' => continue,
                b'}' => break,
                _ => return Err(self.error_at(self.idx - 1, "expected ',' or '}'")),
            }
        }
        self.depth -= 1;
        Ok(JsonValue::object(map))
    }

    fn parse_string(&mut self) -> Result<String, SpinelJsonError> {
        let open = self.idx;
        self.step();
        let mut out = String::new();
        let mut run_start = self.idx;
        loop {
            let Some(&c) = self.buf.get(self.idx) else {
                return Err(self.error_at(open, "unterminated string"));
            };
            match c {
                b'"' => {
                    out.push_str(&self.text[run_start..self.idx]);
                    self.step();
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.text[run_start..self.idx]);
                    self.step();
                    self.parse_escape(&mut out)?;
                    run_start = self.idx;
                }
                0x00..=0x1F => {
                    return Err(self.error("unescaped control character in string"));
                }
                _ => self.step(),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), SpinelJsonError> {
        let escape_start = self.idx - 1;
        match self.next()? {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{08}'),
            b'f' => out.push('\u{0C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let high = self.parse_hex4()?;
                let code = match high {
                    0xD800..=0xDBFF => {
                        if !(self.check_next(b'\\') && self.check_next(b'u')) {
                            return Err(self.error_at(escape_start, "lone surrogate in \\u escape"));
                        }
                        let low = self.parse_hex4()?;
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(self.error_at(escape_start, "invalid surrogate pair"));
                        }
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    }
                    0xDC00..=0xDFFF => {
                        return Err(self.error_at(escape_start, "lone surrogate in \\u escape"));
                    }
                    _ => high,
                };
                let ch = char::from_u32(code)
                    .ok_or_else(|| self.error_at(escape_start, "invalid unicode escape"))?;
                out.push(ch);
            }
            _ => return Err(self.error_at(escape_start, "invalid escape sequence")),
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32, SpinelJsonError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let c = self.next()?;
            let digit = (c as char)
                .to_digit(16)
                .ok_or_else(|| self.error_at(self.idx - 1, "invalid hex digit in \\u escape"))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<JsonValue, SpinelJsonError> {
        let start = self.idx;
        self.check_next(b'-');
        match self.peek() {
            Some(b'0') => {
                self.step();
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(self.error("leading zeros are not allowed"));
                }
            }
            Some(b'1'..=b'9') => {
                self.step_digits();
            }
            _ => return Err(self.error("expected a digit")),
        }

        let mut integral = true;
        if self.check_next(b'.') {
            integral = false;
            if self.step_digits() == 0 {
                return Err(self.error("expected a digit after the decimal point"));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.step();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.step();
            }
            if self.step_digits() == 0 {
                return Err(self.error("expected exponent digits"));
            }
        }

        let literal = &self.text[start..self.idx];
        if integral {
            if let Ok(v) = literal.parse::<i64>() {
                return Ok(JsonValue::Number(ExactNumber::Int(v)));
            }
            if let Ok(v) = literal.parse::<u64>() {
                return Ok(JsonValue::Number(ExactNumber::UInt(v)));
            }
        }
        ExactNumber::from_literal(literal, self.options.wide_number_mode).map(JsonValue::Number)
    }

    fn enter(&mut self) -> Result<(), SpinelJsonError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(format!(
                "nesting exceeds the maximum depth of {}",
                self.options.max_depth
            )));
        }
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.idx).copied()
    }

    fn next(&mut self) -> Result<u8, SpinelJsonError> {
        match self.buf.get(self.idx) {
            Some(&c) => {
                self.idx += 1;
                Ok(c)
            }
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn check_next(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    fn step(&mut self) {
        self.idx += 1;
    }

    fn step_digits(&mut self) -> usize {
        let start = self.idx;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.idx += 1;
        }
        self.idx - start
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.idx += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> SpinelJsonError {
        self.error_at(self.idx, message)
    }

    fn error_at(&self, position: usize, message: impl Into<String>) -> SpinelJsonError {
        SpinelJsonError::parse(message, position)
    }
}
