// src/core/mutation/rewrite.rs

//! The spine rebuild shared by every edit.
//!
//! `rewrite` walks the steps of a path, hands the node at the end to a leaf closure and
//! then rebuilds each container on the way back up. Every container along the path is
//! shallow-copied (its children are `Arc`s), so every subtree off the path is shared
//! with the input document.

use super::SkipReason;
use crate::core::path::Step;
use crate::core::value::{JsonObject, JsonValue};
use bitflags::bitflags;

bitflags! {
    /// How a walk treats absent or `null` nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(super) struct Walk: u8 {
        /// Replace a `null` met on the path with the container the next step needs.
        const MATERIALIZE_NULL = 1 << 0;
        /// Create object members that do not exist.
        const CREATE_MISSING   = 1 << 1;
        /// Pad arrays with `null` to reach an index beyond their length.
        const PAD_INDICES      = 1 << 2;

        const CREATE = Self::MATERIALIZE_NULL.bits()
            | Self::CREATE_MISSING.bits()
            | Self::PAD_INDICES.bits();
        /// Array edits: `null` becomes a container and indices pad, but members must exist.
        const ARRAY_EDIT = Self::MATERIALIZE_NULL.bits() | Self::PAD_INDICES.bits();
    }
}

pub(super) type Leaf<'a> = dyn FnMut(&JsonValue) -> Result<JsonValue, SkipReason> + 'a;

/// Fails when reaching `index` in an array of `len` elements needs more than `max_pad`
/// `null`s.
pub(super) fn check_padding(len: usize, index: usize, max_pad: usize) -> Result<(), SkipReason> {
    if index.saturating_sub(len) > max_pad {
        return Err(SkipReason::PaddingLimit);
    }
    Ok(())
}

/// Rebuilds `node` with the leaf closure applied at the end of `steps`.
///
/// `fresh` marks a node the walk itself just created; below it there is nothing to
/// preserve, so missing members and indices are always created.
pub(super) fn rewrite(
    node: &JsonValue,
    steps: &[Step],
    walk: Walk,
    max_pad: usize,
    fresh: bool,
    leaf: &mut Leaf<'_>,
) -> Result<JsonValue, SkipReason> {
    let Some((step, rest)) = steps.split_first() else {
        return leaf(node);
    };

    match (step, node) {
        (Step::Root, _) => rewrite(node, rest, walk, max_pad, fresh, leaf),
        (Step::Member(key) | Step::QuotedMember(key), JsonValue::Object(map)) => {
            let child = match map.get(key) {
                Some(child) => rewrite(child, rest, walk, max_pad, false, leaf)?,
                None if walk.contains(Walk::CREATE_MISSING) || fresh => {
                    rewrite(&JsonValue::Null, rest, walk, max_pad, true, leaf)?
                }
                None => return Err(SkipReason::PathNotFound),
            };
            let mut map = JsonObject::clone(map);
            map.insert(key.clone(), child);
            Ok(JsonValue::object(map))
        }
        (Step::Index(index), JsonValue::Array(items)) => {
            let index = *index;
            let child = match items.get(index) {
                Some(child) => rewrite(child, rest, walk, max_pad, false, leaf)?,
                None if walk.contains(Walk::PAD_INDICES) || fresh => {
                    check_padding(items.len(), index, max_pad)?;
                    rewrite(&JsonValue::Null, rest, walk, max_pad, true, leaf)?
                }
                None => return Err(SkipReason::PathNotFound),
            };
            let mut items = Vec::clone(items);
            match items.get_mut(index) {
                Some(slot) => *slot = child,
                None => {
                    items.resize(index, JsonValue::Null);
                    items.push(child);
                }
            }
            Ok(JsonValue::array(items))
        }
        (_, JsonValue::Null) if walk.contains(Walk::MATERIALIZE_NULL) || fresh => {
            let empty = match step {
                Step::Index(_) => JsonValue::array(Vec::new()),
                _ => JsonValue::object(JsonObject::new()),
            };
            rewrite(&empty, steps, walk, max_pad, true, leaf)
        }
        (_, JsonValue::Null) => Err(SkipReason::PathNotFound),
        _ => Err(SkipReason::TypeMismatch),
    }
}
