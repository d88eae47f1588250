//! Lexical relevance ranking over an immutable corpus.

use std::collections::HashSet;
use std::path::Path;

use healthagent_core::config::KnowledgeConfig;
use healthagent_core::error::Result;

use crate::document::{BUNDLED_CORPUS, KnowledgeDocument, load_corpus, parse_corpus};
use crate::tokenizer::token_set;

/// Weight of each tag found in the query.
pub const TAG_WEIGHT: f64 = 3.0;
/// Weight of each shared token, before the length penalty.
pub const OVERLAP_WEIGHT: f64 = 1.2;
/// Results must score strictly above this.
pub const MIN_SCORE: f64 = 0.1;

/// A document paired with its score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument<'a> {
    pub document: &'a KnowledgeDocument,
    pub score: f64,
}

/// Query prepared once and scored against every document.
struct Query {
    lowered: String,
    tokens: HashSet<String>,
}

impl Query {
    fn new(raw: &str) -> Self {
        Self {
            lowered: raw.to_lowercase(),
            tokens: token_set(raw),
        }
    }
}

/// Document with its tokens precomputed.
#[derive(Debug)]
struct IndexedDocument {
    document: KnowledgeDocument,
    /// Non-empty tags; repeated entries each count as a hit.
    tags: Vec<String>,
    tokens: HashSet<String>,
}

impl IndexedDocument {
    fn new(document: KnowledgeDocument) -> Self {
        let tags: Vec<String> = document
            .tags
            .iter()
            .filter(|tag| !tag.is_empty())
            .cloned()
            .collect();
        let tokens = token_set(&document.searchable_text());
        Self { document, tags, tokens }
    }

    fn score(&self, query: &Query) -> f64 {
        // Tags match against the raw query text, not its tokens, so "pain" hits "painful".
        let tag_hits = self
            .tags
            .iter()
            .filter(|tag| query.lowered.contains(tag.as_str()))
            .count();
        let overlap = query.tokens.intersection(&self.tokens).count();
        let length_penalty = 1.0 / ((self.tokens.len() + 1) as f64).sqrt();

        tag_hits as f64 * TAG_WEIGHT + overlap as f64 * OVERLAP_WEIGHT * length_penalty
    }
}

/// Score a single document against a query.
pub fn score(query: &str, document: &KnowledgeDocument) -> f64 {
    IndexedDocument::new(document.clone()).score(&Query::new(query))
}

/// Immutable knowledge corpus. Built once at startup and shared read-only.
#[derive(Debug)]
pub struct KnowledgeBase {
    docs: Vec<IndexedDocument>,
}

impl KnowledgeBase {
    pub fn new(documents: Vec<KnowledgeDocument>) -> Self {
        Self {
            docs: documents.into_iter().map(IndexedDocument::new).collect(),
        }
    }

    /// Corpus embedded in the binary.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(parse_corpus(BUNDLED_CORPUS)?))
    }

    /// Corpus read from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(load_corpus(path)?))
    }

    /// Configured corpus file, or the bundled one when none is set.
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self> {
        match config.resolved_path() {
            Some(path) => Self::from_path(&path),
            None => Self::bundled(),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in corpus order.
    pub fn documents(&self) -> impl Iterator<Item = &KnowledgeDocument> {
        self.docs.iter().map(|d| &d.document)
    }

    /// Up to `k` documents by descending score. Equal scores keep corpus
    /// order. Scores at or below [`MIN_SCORE`] are dropped after the cut, so
    /// fewer than `k` results is normal.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<ScoredDocument<'_>> {
        let query_prepared = Query::new(query);
        let mut scored: Vec<ScoredDocument<'_>> = self
            .docs
            .iter()
            .map(|d| ScoredDocument {
                document: &d.document,
                score: d.score(&query_prepared),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        scored.retain(|s| s.score > MIN_SCORE);

        tracing::debug!(k, hits = scored.len(), "knowledge search");
        scored
    }
}
