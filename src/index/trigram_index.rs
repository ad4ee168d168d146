use crate::index::types::*;
use crate::utils::unique_trigrams;
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::ops::Range;
use tracing::{debug, trace};

/// In-memory trigram inverted index.
///
/// Documents are identified by the order they were added in. The index
/// keeps no content, only the trigram -> documents mapping, so callers that
/// want to show a hit keep their own list in lockstep with [`add`](Self::add).
#[derive(Debug, Clone, Default)]
pub struct TrigramIndex {
    /// Trigram -> ids of documents containing it at least once
    postings: FxHashMap<Trigram, RoaringBitmap>,
    /// Number of documents added so far, which is also the next id to assign.
    /// Every id in `postings` is strictly below it.
    doc_count: DocId,
}

impl TrigramIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `content` as a new document and return its id.
    ///
    /// Always consumes an id, even when `content` yields no trigrams; such a
    /// document can never be found by [`search`](Self::search).
    ///
    /// # Panics
    ///
    /// Ids are `u32`, so an index holds at most `u32::MAX` documents. Adding
    /// past that panics before anything is inserted; ids are never reused.
    pub fn add(&mut self, content: &str) -> DocId {
        assert!(
            self.doc_count < DocId::MAX,
            "trigram index is full ({} documents)",
            DocId::MAX
        );
        let doc_id = self.doc_count;

        let trigrams = unique_trigrams(content);
        for &trigram in &trigrams {
            self.postings.entry(trigram).or_default().insert(doc_id);
        }

        self.doc_count += 1;
        trace!(doc_id, trigrams = trigrams.len(), "indexed document");
        doc_id
    }

    /// Add several documents in order, returning the ids they were given
    pub fn extend<I, S>(&mut self, contents: I) -> Range<DocId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = self.doc_count;
        for content in contents {
            self.add(content.as_ref());
        }
        start..self.doc_count
    }

    /// Find documents containing every trigram of `query`.
    ///
    /// A query trigram that occurs several times is satisfied by a single
    /// membership, so only the distinct trigrams are intersected. A query
    /// without trigrams (empty, or only tokens shorter than 3 chars) matches
    /// nothing rather than everything.
    pub fn search(&self, query: &str) -> RoaringBitmap {
        let trigrams = unique_trigrams(query);
        if trigrams.is_empty() {
            debug!(query, "query has no trigrams");
            return RoaringBitmap::new();
        }

        let mut postings = Vec::with_capacity(trigrams.len());
        for trigram in &trigrams {
            match self.postings.get(trigram) {
                Some(docs) => postings.push(docs),
                None => {
                    debug!(query, trigram = %trigram_to_string(*trigram), "trigram not indexed");
                    return RoaringBitmap::new();
                }
            }
        }

        // Smallest posting set first keeps the running intersection small
        postings.sort_unstable_by_key(|docs| docs.len());

        let mut result = postings[0].clone();
        for docs in &postings[1..] {
            if result.is_empty() {
                break;
            }
            result &= *docs;
        }

        debug!(query, trigrams = trigrams.len(), matches = result.len(), "search");
        result
    }

    /// [`search`](Self::search) collected into a Vec
    pub fn search_ids(&self, query: &str) -> Vec<DocId> {
        self.search(query).into_iter().collect()
    }

    /// Posting set for a single trigram, if any document contains it
    pub fn posting(&self, trigram: Trigram) -> Option<&RoaringBitmap> {
        self.postings.get(&trigram)
    }

    /// Number of documents added
    pub fn len(&self) -> usize {
        self.doc_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.doc_count,
            trigram_count: self.postings.len(),
            posting_count: self.postings.values().map(|docs| docs.len()).sum(),
        }
    }
}
