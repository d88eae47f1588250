use healthagent_core::config::HealthAgentConfig;
use healthagent_gateway::{AppState, GatewayDb, build_router};
use healthagent_knowledge::KnowledgeBase;
use healthagent_triage::DISCLAIMER;
use reqwest::Client;
use serde_json::{Value, json};

async fn spawn_app() -> String {
    let mut config = HealthAgentConfig::default();
    config.server.allowed_origin = "https://demo.example.org".into();

    let db = GatewayDb::in_memory().expect("Failed to open in-memory db");
    let knowledge = KnowledgeBase::bundled().expect("Failed to load bundled corpus");
    let app = build_router(AppState::new(config, db, knowledge));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    base_url
}

fn client() -> Client {
    Client::new()
}

async fn post_json(base_url: &str, path: &str, body: Value) -> (u16, Value) {
    let resp = client()
        .post(format!("{}{}", base_url, path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn start_session(base_url: &str) -> String {
    let (status, body) = post_json(base_url, "/session/start", json!({})).await;
    assert_eq!(status, 200);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_root() {
    let base_url = spawn_app().await;
    let body: Value = client()
        .get(format!("{}/", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "AI Health Agent API");
    assert!(body["try"].as_array().unwrap().contains(&json!("/chat")));
}

#[tokio::test]
async fn test_health_reports_memory_mode() {
    let base_url = spawn_app().await;
    let resp = client()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], true);
    assert_eq!(body["db_mode"], "memory");
    assert!(body["knowledge_documents"].as_u64().unwrap() >= 10);
}

#[tokio::test]
async fn test_session_round_trip() {
    let base_url = spawn_app().await;
    let session_id = start_session(&base_url).await;
    assert_eq!(session_id.len(), 36);

    for (qid, option) in [(1, "often"), (2, "rarely")] {
        let (status, body) = post_json(
            &base_url,
            "/answer",
            json!({
                "session_id": session_id,
                "question_id": qid,
                "raw_transcript": format!("I'd say {option}"),
                "mapped_option": option,
                "confidence": 0.9,
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["ok"], true);
    }

    let listed: Value = client()
        .get(format!("{}/session/{}/answers", base_url, session_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let answers = listed["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0]["question_id"], 1);
    assert_eq!(answers[1]["mapped_option"], "rarely");

    let (status, body) =
        post_json(&base_url, "/session/end", json!({ "session_id": session_id })).await;
    assert_eq!(status, 200);
    assert_eq!(body["summary"]["count"], 2);
    let summary = body["summary"]["answers"].as_array().unwrap();
    assert_eq!(summary[0]["mapped_option"], "often");
    assert_eq!(summary[0]["confidence"], 0.9);
    assert!(summary[0].get("raw_transcript").is_none());
}

#[tokio::test]
async fn test_end_unknown_session_is_empty() {
    let base_url = spawn_app().await;
    let (status, body) =
        post_json(&base_url, "/session/end", json!({ "session_id": "nope" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["summary"]["count"], 0);
}

#[tokio::test]
async fn test_answer_missing_field_rejected() {
    let base_url = spawn_app().await;
    let resp = client()
        .post(format!("{}/answer", base_url))
        .json(&json!({ "session_id": "x" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_chat_topic() {
    let base_url = spawn_app().await;
    let (status, body) =
        post_json(&base_url, "/chat", json!({ "message": "I have a bad migraine" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(body["category"], "headache");
    assert!(body["answer"].as_str().unwrap().starts_with(DISCLAIMER));
}

#[tokio::test]
async fn test_chat_emergency_wins() {
    let base_url = spawn_app().await;
    let (_, body) = post_json(
        &base_url,
        "/chat",
        json!({ "message": "I have chest pain and a fever" }),
    )
    .await;
    assert_eq!(body["category"], "emergency");
    assert!(body["answer"].as_str().unwrap().contains("emergency"));
}

#[tokio::test]
async fn test_chat_empty_message() {
    let base_url = spawn_app().await;
    let (status, body) = post_json(&base_url, "/chat", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["category"], "empty");
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.starts_with(DISCLAIMER));
    assert!(answer.ends_with("Please enter a short question or topic."));
}

#[tokio::test]
async fn test_knowledge_search() {
    let base_url = spawn_app().await;
    let (status, body) = post_json(
        &base_url,
        "/knowledge/search",
        json!({ "query": "anxiety breathing", "k": 3 }),
    )
    .await;
    assert_eq!(status, 200);
    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty() && results.len() <= 3);
    assert_eq!(body["count"], results.len());
    assert_eq!(results[0]["title"], "Managing Anxiety");
    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| *s > 0.1));
}

#[tokio::test]
async fn test_knowledge_search_no_match() {
    let base_url = spawn_app().await;
    let (status, body) =
        post_json(&base_url, "/knowledge/search", json!({ "query": "zzzz qqqq" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_knowledge_search_bad_k() {
    let base_url = spawn_app().await;
    for k in [0, 51] {
        let (status, body) = post_json(
            &base_url,
            "/knowledge/search",
            json!({ "query": "sleep", "k": k }),
        )
        .await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("k must be"));
    }
}

#[tokio::test]
async fn test_cors_allowed_origin() {
    let base_url = spawn_app().await;
    for origin in ["https://demo.example.org", "http://localhost:5173"] {
        let resp = client()
            .get(format!("{}/health", base_url))
            .header("Origin", origin)
            .send()
            .await
            .unwrap();
        let allow = resp
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string());
        assert_eq!(allow.as_deref(), Some(origin));
        assert_eq!(
            resp.headers().get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }
}

#[tokio::test]
async fn test_cors_unknown_origin() {
    let base_url = spawn_app().await;
    let resp = client()
        .get(format!("{}/health", base_url))
        .header("Origin", "https://evil.example.com")
        .send()
        .await
        .unwrap();
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_preflight() {
    let base_url = spawn_app().await;
    let resp = client()
        .request(reqwest::Method::OPTIONS, format!("{}/chat", base_url))
        .header("Origin", "http://127.0.0.1:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://127.0.0.1:5173"
    );
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST");
    assert_eq!(headers.get("access-control-allow-headers").unwrap(), "content-type");
}
