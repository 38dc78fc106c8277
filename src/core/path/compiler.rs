// src/core/path/compiler.rs

//! Compiles JSONPath text into an immutable list of navigation steps.
//!
//! Supported forms: `$`, `.name`, `."name"`, `["name"]`, `['name']` and `[n]`, chained in
//! any order after the leading `$`. Everything else is rejected.

use crate::core::SpinelJsonError;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_MAX_PATH_STEPS: usize = 256;

static ROOT_PATH: Lazy<CompiledPath> = Lazy::new(|| CompiledPath {
    text: Arc::from("$"),
    steps: Arc::from(vec![Step::Root]),
});

/// A single navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Root,
    /// A bare `.name` member.
    Member(String),
    /// A member written in quotes, e.g. `."a b"` or `['a.b']`.
    QuotedMember(String),
    Index(usize),
}

impl Step {
    /// The member name for either member form.
    pub fn key(&self) -> Option<&str> {
        match self {
            Step::Member(name) | Step::QuotedMember(name) => Some(name),
            _ => None,
        }
    }
}

/// A validated path. Cloning shares the step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    text: Arc<str>,
    steps: Arc<[Step]>,
}

impl CompiledPath {
    /// The path `$`.
    pub fn root() -> Self {
        ROOT_PATH.clone()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// All steps, starting with `Step::Root`.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The steps after the root.
    pub fn segments(&self) -> &[Step] {
        self.steps.get(1..).unwrap_or(&[])
    }

    pub fn is_root(&self) -> bool {
        self.segments().is_empty()
    }

    pub fn last(&self) -> Option<&Step> {
        self.segments().last()
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for CompiledPath {
    type Err = SpinelJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s, DEFAULT_MAX_PATH_STEPS)
    }
}

/// Compiles `text`, allowing at most `max_steps` steps after the root.
pub fn compile(text: &str, max_steps: usize) -> Result<CompiledPath, SpinelJsonError> {
    if text == "$" {
        return Ok(CompiledPath::root());
    }
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'$') {
        return Err(SpinelJsonError::compile(text, "a path must start with '$'"));
    }

    let mut steps = vec![Step::Root];
    let mut idx = 1;
    while idx < bytes.len() {
        match bytes[idx] {
            b'.' => {
                idx += 1;
                if bytes.get(idx) == Some(&b'"') {
                    let (name, next) = read_quoted(text, idx, b'"')?;
                    steps.push(Step::QuotedMember(name));
                    idx = next;
                } else {
                    let start = idx;
                    while bytes.get(idx).is_some_and(|c| !ends_bare_name(*c)) {
                        idx += 1;
                    }
                    if idx == start {
                        return Err(SpinelJsonError::compile(
                            text,
                            format!("expected a member name at position {start}"),
                        ));
                    }
                    steps.push(Step::Member(text[start..idx].to_string()));
                }
            }
            b'[' => {
                idx += 1;
                match bytes.get(idx) {
                    Some(&quote @ (b'"' | b'\'')) => {
                        let (name, next) = read_quoted(text, idx, quote)?;
                        idx = expect_close(text, next)?;
                        steps.push(Step::QuotedMember(name));
                    }
                    Some(b'0'..=b'9') => {
                        let start = idx;
                        while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
                            idx += 1;
                        }
                        let index = text[start..idx].parse::<usize>().map_err(|_| {
                            SpinelJsonError::compile(text, "array index is too large")
                        })?;
                        idx = expect_close(text, idx)?;
                        steps.push(Step::Index(index));
                    }
                    _ => {
                        return Err(SpinelJsonError::compile(
                            text,
                            format!(
                                "expected a non-negative index or a quoted name at position {idx}"
                            ),
                        ));
                    }
                }
            }
            _ => {
                return Err(SpinelJsonError::compile(
                    text,
                    format!("unexpected character at position {idx}"),
                ));
            }
        }
        if steps.len() - 1 > max_steps {
            return Err(SpinelJsonError::compile(
                text,
                format!("path has more than {max_steps} steps"),
            ));
        }
    }

    Ok(CompiledPath {
        text: Arc::from(text),
        steps: Arc::from(steps),
    })
}

fn ends_bare_name(c: u8) -> bool {
    matches!(c, b'.' | b'[' | b']' | b'"' | b'\'' | b'*') || c.is_ascii_whitespace()
}

/// Reads a quoted name starting at the opening quote. Returns the name and the index
/// just past the closing quote. A backslash escapes the quote character or itself.
fn read_quoted(text: &str, open: usize, quote: u8) -> Result<(String, usize), SpinelJsonError> {
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut idx = open + 1;
    let mut run_start = idx;
    loop {
        match bytes.get(idx) {
            None => {
                return Err(SpinelJsonError::compile(
                    text,
                    format!("unterminated quoted name starting at position {open}"),
                ));
            }
            Some(&c) if c == quote => {
                out.push_str(&text[run_start..idx]);
                return Ok((out, idx + 1));
            }
            Some(b'\\') => {
                out.push_str(&text[run_start..idx]);
                match bytes.get(idx + 1) {
                    Some(&c) if c == quote || c == b'\\' => out.push(c as char),
                    _ => {
                        return Err(SpinelJsonError::compile(
                            text,
                            format!("invalid escape at position {idx}"),
                        ));
                    }
                }
                idx += 2;
                run_start = idx;
            }
            Some(_) => idx += 1,
        }
    }
}

fn expect_close(text: &str, idx: usize) -> Result<usize, SpinelJsonError> {
    if text.as_bytes().get(idx) == Some(&b']') {
        Ok(idx + 1)
    } else {
        Err(SpinelJsonError::compile(
            text,
            format!("expected ']' at position {idx}"),
        ))
    }
}
