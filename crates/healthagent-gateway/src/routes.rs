//! API route handlers for the gateway.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{Value, json};
use std::sync::Arc;

use super::db::NewAnswer;
use super::errors::ApiError;
use super::models::{
    ChatRequest, EndSessionRequest, MAX_K, PostAnswerRequest, SearchHit, SearchRequest,
    StartSessionRequest, SummaryItem,
};
use super::server::AppState;

/// Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": "AI Health Agent API",
        "try": ["/health", "/chat", "/knowledge/search"],
    }))
}

/// Health check endpoint. Reports the store state without ever failing.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let db_ok = match state.db.ping() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("DB ping failed: {e}");
            false
        }
    };
    Json(json!({
        "status": "ok",
        "db": db_ok,
        "db_mode": state.db.mode(),
        "knowledge_documents": state.knowledge.len(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Sessions ----

/// Start a quiz session.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StartSessionRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = state.db.create_session(&body.locale, body.consent)?;
    tracing::info!("Session started: {id} (locale={})", body.locale);
    Ok(Json(json!({ "session_id": id })))
}

/// Record one answer and bump the session's activity time.
pub async fn post_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PostAnswerRequest>,
) -> Result<Json<Value>, ApiError> {
    state.db.record_answer(NewAnswer {
        session_id: &body.session_id,
        question_id: body.question_id,
        raw_transcript: &body.raw_transcript,
        mapped_option: &body.mapped_option,
        confidence: body.confidence,
    })?;

    // Answers for unknown sessions are still kept.
    match state.db.touch_session(&body.session_id) {
        Ok(true) => {}
        Ok(false) => tracing::debug!("Answer for unknown session {}", body.session_id),
        Err(e) => tracing::warn!("Failed to update last_activity for {}: {e}", body.session_id),
    }
    Ok(Json(json!({ "ok": true })))
}

/// List a session's answers, oldest first.
pub async fn list_answers(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let answers = state.db.list_answers(&session_id)?;
    Ok(Json(json!({ "ok": true, "answers": answers })))
}

/// Close a session and summarize its answers.
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EndSessionRequest>,
) -> Result<Json<Value>, ApiError> {
    let items: Vec<SummaryItem> = state
        .db
        .list_answers(&body.session_id)?
        .into_iter()
        .map(|a| SummaryItem {
            question_id: a.question_id,
            mapped_option: a.mapped_option,
            confidence: a.confidence,
        })
        .collect();

    if let Err(e) = state.db.finish_session(&body.session_id) {
        tracing::warn!("Failed to mark session {} finished: {e}", body.session_id);
    }
    tracing::info!("Session ended: {} ({} answers)", body.session_id, items.len());

    Ok(Json(json!({
        "summary": { "count": items.len(), "answers": items },
    })))
}

// ---- Chat ----

/// Safety-filtered canned guidance.
pub async fn chat(Json(body): Json<ChatRequest>) -> Json<Value> {
    let result = healthagent_triage::respond(&body.message);
    Json(json!({
        "ok": true,
        "answer": result.response,
        "category": result.category.as_str(),
    }))
}

// ---- Knowledge Base ----

/// Rank the knowledge base against a query.
pub async fn knowledge_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<Value>, ApiError> {
    let k = body.k.unwrap_or(state.config.knowledge.default_k);
    if k == 0 || k > MAX_K {
        return Err(ApiError::BadRequest(format!("k must be between 1 and {MAX_K}")));
    }

    let hits: Vec<SearchHit<'_>> = state
        .knowledge
        .top_k(&body.query, k)
        .into_iter()
        .map(SearchHit::from)
        .collect();
    Ok(Json(json!({ "ok": true, "results": hits, "count": hits.len() })))
}
