//! In-memory term index with single-term TF-IDF ranking.

pub mod index;
pub mod shared;
pub mod tokenizer;

pub use index::{InvertedIndex, ScoredDocument};
pub use shared::SharedIndex;

pub type DocId = u32;

/// Anything that accepts raw documents.
pub trait Indexable {
    fn index(&mut self, document: &str);
}

/// Anything that answers single-term queries over what it has indexed.
pub trait Searchable {
    /// Documents containing `term`, most relevant first.
    fn search(&self, term: &str) -> Vec<String>;
    /// Every indexed document exactly once, in first-seen order.
    fn list_indexed_documents(&self) -> Vec<String>;
}
