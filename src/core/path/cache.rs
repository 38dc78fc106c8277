// src/core/path/cache.rs

//! An LRU of compiled paths, keyed by path text and shared by every call on an engine.

use super::compiler::{CompiledPath, compile};
use crate::core::SpinelJsonError;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use tracing::trace;

pub struct PathCache {
    /// `None` when the configured capacity is zero.
    store: Option<Mutex<LruCache<String, CompiledPath>>>,
    max_steps: usize,
}

impl PathCache {
    pub fn new(capacity: usize, max_steps: usize) -> Self {
        Self {
            store: NonZeroUsize::new(capacity).map(|c| Mutex::new(LruCache::new(c))),
            max_steps,
        }
    }

    /// Returns the compiled form of `text`, compiling and caching it on a miss.
    /// Compile errors are never cached.
    pub fn get_or_compile(&self, text: &str) -> Result<CompiledPath, SpinelJsonError> {
        if let Some(store) = &self.store
            && let Some(path) = store.lock().get(text)
        {
            trace!(path = text, "path cache hit");
            return Ok(path.clone());
        }

        let path = compile(text, self.max_steps)?;
        trace!(path = text, "path cache miss");
        if let Some(store) = &self.store {
            store.lock().put(text.to_string(), path.clone());
        }
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.lock().cap().get())
    }

    pub fn clear(&self) {
        if let Some(store) = &self.store {
            store.lock().clear();
        }
    }
}

impl std::fmt::Debug for PathCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("max_steps", &self.max_steps)
            .finish()
    }
}
