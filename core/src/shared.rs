use crate::{Indexable, InvertedIndex, Searchable};
use parking_lot::RwLock;
use std::sync::Arc;

/// An [`InvertedIndex`] that can be shared between threads.
///
/// Each `index()` call holds the write lock for its whole duration; queries take
/// the read lock. Clones share the same underlying index.
#[derive(Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<InvertedIndex>>,
}

impl SharedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn index(&self, document: &str) { self.inner.write().index(document); }

    pub fn search(&self, term: &str) -> Vec<String> { self.inner.read().search(term) }

    pub fn list_indexed_documents(&self) -> Vec<String> { self.inner.read().list_indexed_documents() }
}

impl From<InvertedIndex> for SharedIndex {
    fn from(index: InvertedIndex) -> Self {
        Self { inner: Arc::new(RwLock::new(index)) }
    }
}

impl Indexable for SharedIndex {
    fn index(&mut self, document: &str) { SharedIndex::index(self, document) }
}

impl Searchable for SharedIndex {
    fn search(&self, term: &str) -> Vec<String> { SharedIndex::search(self, term) }
    fn list_indexed_documents(&self) -> Vec<String> { SharedIndex::list_indexed_documents(self) }
}
