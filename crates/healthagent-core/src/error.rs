//! Error types for HealthAgent.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum HealthAgentError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HealthAgentError>;
