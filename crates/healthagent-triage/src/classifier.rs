//! Triage classification over the static rule tables.

use crate::rules::{
    DISCLAIMER, EMERGENCY_RESPONSE, EMERGENCY_SIGNS, EMPTY_INPUT_RESPONSE, FALLBACK_RESPONSE,
    TOPIC_RULES,
};

/// Which branch of the triage produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Emergency,
    Topic(&'static str),
    Fallback,
    Empty,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Emergency => "emergency",
            Category::Topic(topic) => *topic,
            Category::Fallback => "fallback",
            Category::Empty => "empty",
        }
    }
}

/// A classified message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triage {
    pub category: Category,
    pub response: String,
}

impl Triage {
    fn new(category: Category, body: &str) -> Self {
        Self {
            category,
            response: format!("{DISCLAIMER} {body}"),
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Classify `text` and keep the matched category.
pub fn triage(text: &str) -> Triage {
    let t = normalize(text);

    if EMERGENCY_SIGNS.iter().any(|sign| t.contains(sign)) {
        return Triage::new(Category::Emergency, EMERGENCY_RESPONSE);
    }

    match TOPIC_RULES.iter().find(|rule| rule.matches(&t)) {
        Some(rule) => Triage::new(Category::Topic(rule.topic), rule.response),
        None => Triage::new(Category::Fallback, FALLBACK_RESPONSE),
    }
}

/// Map free text to a disclaimer-prefixed guidance string.
///
/// Total: any input, including the empty string, yields one of the canned
/// responses.
pub fn classify(text: &str) -> String {
    triage(text).response
}

/// Chat entry point. Blank messages get a prompt for input instead of a
/// classification.
pub fn respond(message: &str) -> Triage {
    if message.trim().is_empty() {
        return Triage::new(Category::Empty, EMPTY_INPUT_RESPONSE);
    }
    let result = triage(message);
    tracing::debug!(category = result.category.as_str(), "triaged chat message");
    result
}
