pub mod config;
pub mod corpus;
pub mod session;

use anyhow::Result;
use config::Args;
use corpus::{CorpusSource, FileCorpus, SampleCorpus};
use search_core::InvertedIndex;

/// Build the index the console will query, from the corpus named in `args`.
pub fn build_index(args: &Args) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    let mut submitted = 0;
    if args.corpus.is_none() || args.with_sample {
        submitted += SampleCorpus.index_into(&mut index)?;
    }
    if let Some(path) = &args.corpus {
        submitted += FileCorpus::new(path).index_into(&mut index)?;
    }
    tracing::info!(submitted, num_docs = index.num_docs(), num_terms = index.num_terms(), "index ready");
    Ok(index)
}
