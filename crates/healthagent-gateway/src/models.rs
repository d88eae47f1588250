//! Request and response bodies for the REST API.

use healthagent_knowledge::ScoredDocument;
use serde::{Deserialize, Serialize};

/// Upper bound for `k` on knowledge search.
pub const MAX_K: usize = 50;

/// `POST /session/start`
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "bool_true")]
    pub consent: bool,
}

fn default_locale() -> String { "en-US".into() }
fn bool_true() -> bool { true }

/// `POST /answer`
#[derive(Debug, Deserialize)]
pub struct PostAnswerRequest {
    pub session_id: String,
    pub question_id: i64,
    pub raw_transcript: String,
    pub mapped_option: String,
    pub confidence: f64,
}

/// `POST /session/end`
#[derive(Debug, Deserialize)]
pub struct EndSessionRequest {
    pub session_id: String,
}

/// `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// `POST /knowledge/search`
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// Defaults to `knowledge.default_k` from config.
    pub k: Option<usize>,
}

/// Entry of `/session/end` summaries.
#[derive(Debug, Serialize)]
pub struct SummaryItem {
    pub question_id: i64,
    pub mapped_option: String,
    pub confidence: f64,
}

/// One knowledge search hit.
#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub tags: &'a [String],
    pub score: f64,
}

impl<'a> From<ScoredDocument<'a>> for SearchHit<'a> {
    fn from(hit: ScoredDocument<'a>) -> Self {
        Self {
            title: &hit.document.title,
            summary: &hit.document.summary,
            tags: &hit.document.tags,
            score: hit.score,
        }
    }
}
