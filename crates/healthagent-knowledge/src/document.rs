//! Knowledge documents and the corpus loader.

use healthagent_core::error::{HealthAgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default corpus shipped with the binary.
pub const BUNDLED_CORPUS: &str = include_str!("../data/kb.json");

/// One educational article. Identity is its position in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl KnowledgeDocument {
    pub fn new(title: &str, summary: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            summary: summary.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Text the tokenizer sees: title, summary and tags joined by spaces.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.tags.join(" "))
    }
}

/// Parse a JSON array of documents.
pub fn parse_corpus(json: &str) -> Result<Vec<KnowledgeDocument>> {
    serde_json::from_str(json)
        .map_err(|e| HealthAgentError::Knowledge(format!("Invalid corpus JSON: {e}")))
}

/// Read a corpus file (JSON array of `{title, summary, tags}`).
pub fn load_corpus(path: &Path) -> Result<Vec<KnowledgeDocument>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HealthAgentError::Knowledge(format!("Failed to read {}: {e}", path.display()))
    })?;
    let docs = parse_corpus(&content)?;
    tracing::debug!("Loaded {} knowledge documents from {}", docs.len(), path.display());
    Ok(docs)
}
