//! # HealthAgent Core
//!
//! Configuration and the shared error type used by every HealthAgent crate.

pub mod config;
pub mod error;

pub use config::HealthAgentConfig;
pub use error::{HealthAgentError, Result};
