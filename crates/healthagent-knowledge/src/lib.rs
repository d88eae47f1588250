//! # HealthAgent Knowledge Base
//!
//! A fixed, in-memory set of short educational articles ranked by a cheap
//! lexical score. No index and no embeddings: the corpus is a dozen documents.
//!
//! ## Scoring
//! ```text
//! score = tag_hits * 3.0 + overlap * 1.2 / sqrt(doc_tokens + 1)
//!
//! tag_hits   tags found as substrings of the lowercased query
//! overlap    distinct tokens shared by query and document
//! doc_tokens distinct tokens in title + summary + tags
//! ```
//! Results are the top `k` by score, minus anything scoring ≤ 0.1.

pub mod document;
pub mod search;
pub mod tokenizer;

pub use document::{KnowledgeDocument, load_corpus};
pub use search::{KnowledgeBase, ScoredDocument};
