//! Integration tests for coffee-service.
//!
//! These spawn the real application on a random port. The completion
//! provider is a wiremock server, so no API key or network access is needed.
//! Run with: cargo test -p coffee-service --test health_check

use coffee_service::config::CoffeeConfig;
use coffee_service::startup::Application;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Spawn the application on a random port, pointed at `base_url`.
async fn spawn_app(base_url: String) -> u16 {
    std::env::set_var("APP__PORT", "0"); // Random port

    let mut config = CoffeeConfig::load().expect("Failed to load config");
    config.openai.base_url = base_url;

    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app("http://127.0.0.1:1/v1".to_string()).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "coffee-ai-assistant");
}

#[tokio::test]
async fn root_works_with_unreachable_provider() {
    let port = spawn_app("http://127.0.0.1:1/v1".to_string()).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Welcome to Coffee AI Assistant!");
}

#[tokio::test]
async fn ask_coffee_round_trips_through_provider() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Use a 1:16 ratio." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let port = spawn_app(format!("{}/v1", provider.uri())).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/ask-coffee", port))
        .json(&json!({ "question": "What ratio for pour-over?" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["question"], "What ratio for pour-over?");
    assert_eq!(body["ai_response"], "Use a 1:16 ratio.");
    assert_eq!(body["coffee_expert"], "☕ AI Barista");
}

#[tokio::test]
async fn ask_coffee_surfaces_provider_401() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&provider)
        .await;

    let port = spawn_app(format!("{}/v1", provider.uri())).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/ask-coffee", port))
        .json(&json!({}))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("OPENAI_API_KEY"));
}
