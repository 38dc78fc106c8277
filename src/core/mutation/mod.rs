// src/core/mutation/mod.rs

//! Copy-on-write edits of JSON documents.
//!
//! An edit never touches its input: `apply` returns a new root that shares every
//! subtree off the edited path with the old one. An edit whose path does not fit the
//! document is skipped and the old root is returned unchanged. Only malformed requests
//! (removing `$`, inserting at a non-index path) are errors.
//!
//! `max_pad` bounds how many `null`s an edit may add to reach an index past the end of
//! an array; an edit that needs more is skipped.

mod rewrite;

use crate::core::SpinelJsonError;
use crate::core::path::{CompiledPath, Step};
use crate::core::value::JsonValue;
use rewrite::{Walk, check_padding, rewrite};
use strum_macros::Display;
use tracing::trace;

/// One edit request.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Replace (or, with `create_if_missing`, create) the value at `path`.
    Set {
        path: CompiledPath,
        value: JsonValue,
        create_if_missing: bool,
    },
    /// Remove the member or element at `path`.
    Remove { path: CompiledPath },
    /// Push `values` onto the array at `path`.
    ArrayAppend {
        path: CompiledPath,
        values: Vec<JsonValue>,
    },
    /// Insert `values` before the element addressed by `path`.
    ArrayInsert {
        path: CompiledPath,
        values: Vec<JsonValue>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SkipReason {
    #[strum(serialize = "path not found")]
    PathNotFound,
    #[strum(serialize = "type mismatch")]
    TypeMismatch,
    #[strum(serialize = "array padding limit exceeded")]
    PaddingLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Skipped(SkipReason),
}

impl EditOp {
    pub fn path(&self) -> &CompiledPath {
        match self {
            EditOp::Set { path, .. }
            | EditOp::Remove { path }
            | EditOp::ArrayAppend { path, .. }
            | EditOp::ArrayInsert { path, .. } => path,
        }
    }

    /// Rejects requests that can never be applied, whatever the document.
    pub fn validate(&self) -> Result<(), SpinelJsonError> {
        match self {
            EditOp::Remove { path } if path.is_root() => Err(SpinelJsonError::InvalidArgument(
                "the root of a document ('$') cannot be removed".to_string(),
            )),
            EditOp::ArrayInsert { path, .. } if !matches!(path.last(), Some(Step::Index(_))) => {
                Err(SpinelJsonError::InvalidArgument(format!(
                    "array insert path '{path}' must end with an array index"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Applies a single edit, returning the new root and whether the edit took effect.
pub fn apply(
    root: &JsonValue,
    op: &EditOp,
    max_pad: usize,
) -> Result<(JsonValue, EditOutcome), SpinelJsonError> {
    op.validate()?;
    let edited = match op {
        EditOp::Set {
            path,
            value,
            create_if_missing,
        } => {
            let walk = if *create_if_missing {
                Walk::CREATE
            } else {
                Walk::empty()
            };
            rewrite(root, path.segments(), walk, max_pad, false, &mut |_| {
                Ok(value.clone())
            })
        }
        EditOp::Remove { path } => {
            let (last, parent) = split_last(path)?;
            rewrite(root, parent, Walk::empty(), max_pad, false, &mut |node| {
                remove_child(node, last)
            })
        }
        EditOp::ArrayAppend { path, values } => {
            rewrite(
                root,
                path.segments(),
                Walk::ARRAY_EDIT,
                max_pad,
                false,
                &mut |node| match node {
                    JsonValue::Array(items) => {
                        let mut items = Vec::clone(items);
                        items.extend(values.iter().cloned());
                        Ok(JsonValue::array(items))
                    }
                    JsonValue::Null => Ok(JsonValue::array(values.clone())),
                    _ => Err(SkipReason::TypeMismatch),
                },
            )
        }
        EditOp::ArrayInsert { path, values } => {
            let (last, parent) = split_last(path)?;
            let Step::Index(index) = *last else {
                return Err(SpinelJsonError::Internal(
                    "array insert path was not validated".to_string(),
                ));
            };
            rewrite(root, parent, Walk::ARRAY_EDIT, max_pad, false, &mut |node| {
                insert_at(node, index, values, max_pad)
            })
        }
    };

    Ok(match edited {
        Ok(new_root) => (new_root, EditOutcome::Applied),
        Err(reason) => (root.clone(), EditOutcome::Skipped(reason)),
    })
}

/// Applies `ops` strictly left to right, each seeing the result of the previous one.
pub fn apply_all(
    root: JsonValue,
    ops: &[EditOp],
    max_pad: usize,
) -> Result<JsonValue, SpinelJsonError> {
    ops.iter().try_fold(root, |current, op| {
        let (next, outcome) = apply(&current, op, max_pad)?;
        if let EditOutcome::Skipped(reason) = outcome {
            trace!(path = op.path().text(), %reason, "edit skipped");
        }
        Ok(next)
    })
}

fn split_last(path: &CompiledPath) -> Result<(&Step, &[Step]), SpinelJsonError> {
    path.segments()
        .split_last()
        .ok_or_else(|| SpinelJsonError::Internal(format!("path '{path}' has no last step")))
}

fn remove_child(parent: &JsonValue, last: &Step) -> Result<JsonValue, SkipReason> {
    match (last, parent) {
        (Step::Member(key) | Step::QuotedMember(key), JsonValue::Object(map)) => {
            if !map.contains_key(key) {
                return Err(SkipReason::PathNotFound);
            }
            let mut map = map.as_ref().clone();
            map.shift_remove(key);
            Ok(JsonValue::object(map))
        }
        (Step::Index(index), JsonValue::Array(items)) => {
            if *index >= items.len() {
                return Err(SkipReason::PathNotFound);
            }
            let mut items = items.as_ref().clone();
            items.remove(*index);
            Ok(JsonValue::array(items))
        }
        (_, JsonValue::Null) => Err(SkipReason::PathNotFound),
        _ => Err(SkipReason::TypeMismatch),
    }
}

fn insert_at(
    parent: &JsonValue,
    index: usize,
    values: &[JsonValue],
    max_pad: usize,
) -> Result<JsonValue, SkipReason> {
    let mut items = match parent {
        JsonValue::Array(items) => items.as_ref().clone(),
        JsonValue::Null => Vec::new(),
        _ => return Err(SkipReason::TypeMismatch),
    };
    check_padding(items.len(), index, max_pad)?;
    if index > items.len() {
        items.resize(index, JsonValue::Null);
    }
    items.splice(index..index, values.iter().cloned());
    Ok(JsonValue::array(items))
}
