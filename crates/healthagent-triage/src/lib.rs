//! # HealthAgent Triage
//!
//! Maps free text to one canned, safety-reviewed educational response.
//! No NLP and no model: lowercase substring tests against static tables.
//!
//! ## Precedence
//! ```text
//! text ──▶ normalize (lowercase + trim)
//!            │
//!            ├─ any EMERGENCY_SIGNS phrase? ──▶ emergency response (always wins)
//!            │
//!            ├─ TOPIC_RULES, in declared order ──▶ first matching topic
//!            │
//!            └─ nothing matched ──▶ "ask me about a topic"
//! ```
//! Every response starts with [`DISCLAIMER`].

pub mod classifier;
pub mod rules;

pub use classifier::{Category, Triage, classify, respond, triage};
pub use rules::{DISCLAIMER, EMERGENCY_SIGNS, TOPIC_RULES, TopicRule};
