// src/core/value/writer.rs

//! Canonical JSON text output, compact and pretty.

use super::JsonValue;
use std::fmt::Write as _;

/// Writes `value` with no insignificant whitespace.
pub fn write_compact(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        JsonValue::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped_str(key, out);
                out.push(':');
                write_compact(item, out);
            }
            out.push('}');
        }
        scalar => write_scalar(scalar, out),
    }
}

/// Writes `value` with one member per line, indented by `indent` spaces per level.
pub fn write_pretty(value: &JsonValue, indent: usize, out: &mut String) {
    write_pretty_at(value, indent, 0, out);
}

fn write_pretty_at(value: &JsonValue, indent: usize, level: usize, out: &mut String) {
    match value {
        JsonValue::Array(items) if items.is_empty() => out.push_str("[]"),
        JsonValue::Object(map) if map.is_empty() => out.push_str("{}"),
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(indent, level + 1, out);
                write_pretty_at(item, indent, level + 1, out);
            }
            newline(indent, level, out);
            out.push(']');
        }
        JsonValue::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(indent, level + 1, out);
                write_escaped_str(key, out);
                out.push_str(": ");
                write_pretty_at(item, indent, level + 1, out);
            }
            newline(indent, level, out);
            out.push('}');
        }
        scalar => write_scalar(scalar, out),
    }
}

fn newline(indent: usize, level: usize, out: &mut String) {
    out.push('\n');
    out.extend(std::iter::repeat_n(' ', indent * level));
}

fn write_scalar(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Number(n) => {
            let _ = write!(out, "{n}");
        }
        JsonValue::String(s) => write_escaped_str(s, out),
        JsonValue::Array(_) | JsonValue::Object(_) => write_compact(value, out),
    }
}

/// Writes `s` as a quoted JSON string literal.
pub fn write_escaped_str(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
