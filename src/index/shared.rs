use crate::index::trigram_index::TrigramIndex;
use crate::index::types::{DocId, IndexStats};
use roaring::RoaringBitmap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe handle to a [`TrigramIndex`].
///
/// `add` takes the write lock, `search` takes a read lock, so searches run
/// concurrently against a stable index and never observe a half-added
/// document. Clones share the same index.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<TrigramIndex>>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_index(index: TrigramIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn add(&self, content: &str) -> DocId {
        self.write().add(content)
    }

    pub fn search(&self, query: &str) -> RoaringBitmap {
        self.read().search(query)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.read().stats()
    }

    // A panic inside add/search cannot leave the index half-updated: the
    // counter only moves after every posting insert, so poisoned guards
    // are safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, TrigramIndex> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrigramIndex> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
