//! Integration tests for the tonal-web server.
//!
//! These tests start a real axum server on a random port and exercise
//! `POST /analyze-sentiment` with stubbed and HTTP-backed generators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tonal_rs::{FnGenerator, LocalModelClient, MODEL_NOTE, SentimentAnalyzer, TextGenerator};
use tonal_web::{WebConfig, spawn_web};

const JOYFUL: &str = "Sentiment: Positive\nExplanation: The user expressed joy.";

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(generator: impl TextGenerator + 'static) -> String {
    let analyzer = SentimentAnalyzer::new(Arc::new(generator));
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(analyzer, config).await.unwrap();
    format!("http://{addr}")
}

/// Helper: a generator that counts calls and returns `output`.
fn counting(output: &'static str) -> (FnGenerator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let generator = FnGenerator::new("counting", move |_prompt| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok(output.to_string()) }
    });
    (generator, calls)
}

async fn post_json(base: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/analyze-sentiment"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

// ── Contract ─────────────────────────────────────────────────────────

#[tokio::test]
async fn analyze_returns_wrapped_output() {
    let base = spawn_test_server(FnGenerator::fixed(JOYFUL)).await;

    let resp = post_json(&base, serde_json::json!({"text": "I love this!"})).await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "result": {
                "raw_output": JOYFUL,
                "note": "Processed locally with Flan-T5-Base (Free)"
            }
        })
    );
}

#[tokio::test]
async fn missing_text_is_rejected_without_inference() {
    let (generator, calls) = counting(JOYFUL);
    let base = spawn_test_server(generator).await;

    let resp = post_json(&base, serde_json::json!({"message": "I love this!"})).await;
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["detail"].as_str().unwrap().contains("text"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_type_text_is_rejected() {
    let (generator, calls) = counting(JOYFUL);
    let base = spawn_test_server(generator).await;

    let resp = post_json(&base, serde_json::json!({"text": 42})).await;
    assert_eq!(resp.status(), 422);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_json_body_is_unprocessable() {
    let (generator, calls) = counting(JOYFUL);
    let base = spawn_test_server(generator).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze-sentiment"))
        .body("text=hello")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["detail"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_json_syntax_is_unprocessable() {
    let (generator, calls) = counting(JOYFUL);
    let base = spawn_test_server(generator).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze-sentiment"))
        .header("content-type", "application/json")
        .body(r#"{"text": "#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["detail"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn multi_megabyte_text_is_accepted() {
    let generator = FnGenerator::new("length", |prompt: String| {
        let len = prompt.len();
        async move { Ok(format!("prompt of {len} bytes")) }
    });
    let base = spawn_test_server(generator).await;

    let text = "a".repeat(3 * 1024 * 1024);
    let expected_len = tonal_rs::format_prompt(&text).len();

    let resp = post_json(&base, serde_json::json!({"text": text})).await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "result": {
                "raw_output": format!("prompt of {expected_len} bytes"),
                "note": MODEL_NOTE
            }
        })
    );
}

#[tokio::test]
async fn inference_failure_returns_500_with_detail() {
    let base = spawn_test_server(FnGenerator::failing("model overloaded")).await;

    let resp = post_json(&base, serde_json::json!({"text": "I love this!"})).await;
    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"detail": "model overloaded"}));
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let (generator, calls) = counting(JOYFUL);
    let base = spawn_test_server(generator).await;

    let first: serde_json::Value = post_json(&base, serde_json::json!({"text": "I love this!"}))
        .await
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = post_json(&base, serde_json::json!({"text": "I love this!"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let base = spawn_test_server(FnGenerator::fixed(JOYFUL)).await;
    let resp = reqwest::get(format!("{base}/analyze-sentiment")).await.unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn concurrent_requests_share_one_generator() {
    let (generator, calls) = counting("Sentiment: Neutral");
    let base = spawn_test_server(generator).await;

    let requests = (0..8).map(|i| {
        let base = base.clone();
        tokio::spawn(async move {
            post_json(&base, serde_json::json!({"text": format!("message {i}")}))
                .await
                .status()
        })
    });
    for handle in requests {
        assert_eq!(handle.await.unwrap(), 200);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}

// ── Against a model server ──────────────────────────────────────────

/// Helper: a stand-in text-generation-inference server. Reports the prompt
/// length as the generation, or fails when the prompt mentions "overload".
async fn spawn_fake_model_server() -> String {
    async fn generate(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
        let inputs = body["inputs"].as_str().unwrap_or_default();
        if inputs.contains("overload") {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"error": "Model is overloaded", "error_type": "overloaded"})),
            );
        }
        (
            StatusCode::OK,
            Json(serde_json::json!({"generated_text": format!("Sentiment: Positive ({} chars)", inputs.len())})),
        )
    }

    let router = axum::Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/generate", post(generate));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn end_to_end_with_model_server() {
    let model_base = spawn_fake_model_server().await;
    let client = LocalModelClient::new(&model_base, "google/flan-t5-base").unwrap();
    client.health_check().await.unwrap();

    let expected_len = tonal_rs::format_prompt("I love this!").len();
    let base = spawn_test_server(client).await;

    let resp = post_json(&base, serde_json::json!({"text": "I love this!"})).await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json["result"]["raw_output"],
        format!("Sentiment: Positive ({expected_len} chars)")
    );
    assert_eq!(json["result"]["note"], MODEL_NOTE);
}

#[tokio::test]
async fn model_server_error_is_echoed() {
    let model_base = spawn_fake_model_server().await;
    let client = LocalModelClient::new(&model_base, "google/flan-t5-base").unwrap();
    let base = spawn_test_server(client).await;

    let resp = post_json(&base, serde_json::json!({"text": "overload please"})).await;
    assert_eq!(resp.status(), 500);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "Model is overloaded");
}

#[tokio::test]
async fn unreachable_model_server_fails_health_check() {
    // Bind and drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = LocalModelClient::new(format!("http://{addr}"), "m").unwrap();
    let err = client.health_check().await.unwrap_err();
    assert!(err.contains("unreachable"));
}
