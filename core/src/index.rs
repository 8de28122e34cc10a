use crate::tokenizer::{normalize, split_tokens, tokenize};
use crate::{DocId, Indexable, Searchable};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub text: String,
    pub score: f64,
}

/// Term -> posting list, plus the interned document texts the postings point into.
///
/// Identical document texts share one `DocId`. Postings are not deduplicated:
/// a document using a term twice appears twice in that term's list.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
    docs: Vec<String>,
    doc_id_map: HashMap<String, DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Number of distinct terms. This is the numerator of the IDF ratio.
    pub fn num_terms(&self) -> usize { self.postings.len() }

    /// Number of distinct document texts.
    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Posting list for an already normalized term, resolved to document texts.
    pub fn postings(&self, term: &str) -> Option<Vec<&str>> {
        self.postings
            .get(term)
            .map(|plist| plist.iter().map(|&id| self.docs[id as usize].as_str()).collect())
    }

    pub fn index(&mut self, document: &str) {
        let terms = tokenize(document);
        if terms.is_empty() {
            tracing::debug!("document has no indexable terms, skipping");
            return;
        }
        let doc_id = match self.doc_id_map.get(document) {
            Some(&id) => id,
            None => {
                let id = self.docs.len() as DocId;
                self.docs.push(document.to_string());
                self.doc_id_map.insert(document.to_string(), id);
                id
            }
        };
        let num_postings = terms.len();
        for term in terms {
            self.postings.entry(term).or_default().push(doc_id);
        }
        tracing::debug!(doc_id, num_postings, num_terms = self.postings.len(), "indexed document");
    }

    pub fn search(&self, term: &str) -> Vec<String> {
        self.search_scored(term).into_iter().map(|d| d.text).collect()
    }

    /// Rank the documents containing `term` by tf * idf.
    ///
    /// `idf = ln(num_terms / posting_len)` and `tf` counts raw tokens equal to the
    /// normalized term (ASCII case-insensitive) over the document's token count.
    /// Ties keep the order of first appearance in the posting list.
    pub fn search_scored(&self, term: &str) -> Vec<ScoredDocument> {
        let term = normalize(term);
        if term.is_empty() {
            return Vec::new();
        }
        let Some(plist) = self.postings.get(&term) else {
            tracing::debug!(%term, "term not in index");
            return Vec::new();
        };

        let idf = finite_or_zero(
            (self.postings.len() as f64 / plist.len() as f64).ln(),
            &term,
            "idf",
        );

        let mut seen: HashSet<DocId> = HashSet::new();
        let mut scored: Vec<ScoredDocument> = Vec::new();
        for &doc_id in plist {
            if !seen.insert(doc_id) {
                continue;
            }
            let text = &self.docs[doc_id as usize];
            let tokens = split_tokens(text);
            let tf = if tokens.is_empty() {
                0.0
            } else {
                let hits = tokens.iter().filter(|t| t.eq_ignore_ascii_case(&term)).count();
                hits as f64 / tokens.len() as f64
            };
            let score = finite_or_zero(tf * idf, &term, "score");
            scored.push(ScoredDocument { text: text.clone(), score });
        }

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        tracing::debug!(%term, idf, total_hits = scored.len(), "ranked documents");
        scored
    }

    pub fn list_indexed_documents(&self) -> Vec<String> { self.docs.clone() }
}

fn finite_or_zero(value: f64, term: &str, what: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!(term, what, value, "non-finite relevance, treating as zero");
        0.0
    }
}

impl Indexable for InvertedIndex {
    fn index(&mut self, document: &str) { InvertedIndex::index(self, document) }
}

impl Searchable for InvertedIndex {
    fn search(&self, term: &str) -> Vec<String> { InvertedIndex::search(self, term) }
    fn list_indexed_documents(&self) -> Vec<String> { InvertedIndex::list_indexed_documents(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postings_keep_duplicates() {
        let mut idx = InvertedIndex::new();
        idx.index("brown cow, brown dog");
        idx.index("brown cow, brown dog");
        assert_eq!(idx.postings("brown").unwrap().len(), 4);
        assert_eq!(idx.num_docs(), 1);
        assert_eq!(idx.list_indexed_documents(), vec!["brown cow, brown dog"]);
    }

    #[test]
    fn keys_are_normalized_and_never_empty() {
        let mut idx = InvertedIndex::new();
        idx.index("The Foxes jumped over the dog.");
        assert!(idx.postings("fox").is_some());
        assert!(idx.postings("jump").is_some());
        assert!(idx.postings("Foxes").is_none());
        assert!(idx.postings("the").is_none());
        assert!(idx.postings("").is_none());
        assert_eq!(idx.num_terms(), 4);
    }

    #[test]
    fn stop_word_only_document_is_not_recorded() {
        let mut idx = InvertedIndex::new();
        idx.index("the and, of!");
        idx.index("");
        assert!(idx.is_empty());
        assert_eq!(idx.num_terms(), 0);
    }

    #[test]
    fn single_term_index_has_zero_idf_but_still_returns_matches() {
        let mut idx = InvertedIndex::new();
        idx.index("dog");
        idx.index("dog dog");
        // one key, posting length 3: ln(1/3) < 0 but finite
        let hits = idx.search_scored("dog");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.score.is_finite()));

        let mut idx = InvertedIndex::new();
        idx.index("cat");
        let hits = idx.search_scored("cat");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn tf_compares_raw_tokens_against_normalized_term() {
        let mut idx = InvertedIndex::new();
        idx.index("foxes run");
        idx.index("bird sings");
        // "foxes" is indexed under "fox", but no raw token equals "fox"
        let hits = idx.search_scored("fox");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "foxes run");
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn ties_keep_posting_order() {
        let mut idx = InvertedIndex::new();
        idx.index("alpha beta");
        idx.index("gamma beta");
        idx.index("delta epsilon zeta");
        let hits = idx.search("beta");
        assert_eq!(hits, vec!["alpha beta", "gamma beta"]);
    }
}
