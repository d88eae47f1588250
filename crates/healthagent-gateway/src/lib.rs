//! # HealthAgent Gateway
//!
//! HTTP API for the demo frontend: quiz sessions, triage chat and
//! knowledge search.
//!
//! ```text
//! POST /session/start  → sessions row
//! POST /answer         → answers row, touch session
//! POST /session/end    → summary of answers
//! POST /chat           → healthagent_triage::respond
//! POST /knowledge/search → KnowledgeBase::top_k
//! ```

pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod server;

pub use db::{DbMode, GatewayDb};
pub use errors::ApiError;
pub use server::{AppState, build_router, start};
