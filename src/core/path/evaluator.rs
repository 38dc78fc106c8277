// src/core/path/evaluator.rs

//! Read-only path lookup.

use super::compiler::{CompiledPath, Step};
use crate::core::value::JsonValue;

/// The result of walking a path. A located JSON `null` is `Found`, not `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a JsonValue),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn found(self) -> Option<&'a JsonValue> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The located value when it is a boolean, number or string.
    pub fn scalar(self) -> Option<&'a JsonValue> {
        self.found().filter(|v| v.is_scalar())
    }
}

/// Walks `path` from `root`.
pub fn lookup<'a>(root: &'a JsonValue, path: &CompiledPath) -> Lookup<'a> {
    match find_by_steps(root, path.segments()) {
        Some(value) => Lookup::Found(value),
        None => Lookup::NotFound,
    }
}

pub(crate) fn find_by_steps<'a>(root: &'a JsonValue, steps: &[Step]) -> Option<&'a JsonValue> {
    let mut current = root;
    for step in steps {
        current = match step {
            Step::Root => current,
            Step::Member(key) | Step::QuotedMember(key) => current.as_object()?.get(key)?,
            Step::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}
