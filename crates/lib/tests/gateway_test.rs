//! # Completion Gateway Tests
//!
//! Exercises the OpenRouter provider against a wiremock server: request
//! shape and headers, success parsing, upstream failure mapping, malformed
//! responses, retry behavior, and the request timeout.

mod common;

use anyhow::Result;
use common::setup_tracing;
use samvidhan::providers::ai::openrouter::{CompletionSettings, OpenRouterProvider};
use samvidhan::providers::ai::CompletionProvider;
use samvidhan::types::PromptPayload;
use samvidhan::AnswerError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> CompletionSettings {
    CompletionSettings {
        api_url: format!("{}/api/v1/chat/completions", server.uri()),
        api_key: "test-key".to_string(),
        referer: "http://localhost:8080".to_string(),
        app_title: "Samvidhan".to_string(),
        timeout_secs: 2,
        max_retries: 0,
    }
}

fn payload() -> PromptPayload {
    PromptPayload {
        system_instruction: "You are a helpful assistant.".to_string(),
        user_content: "What is Article 21?".to_string(),
        temperature: 0.7,
        max_tokens: 800,
        model_id: "mistralai/mistral-7b-instruct".to_string(),
    }
}

fn success_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_successful_completion_returns_first_choice_verbatim() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("X-Title", "Samvidhan"))
        .and(header("HTTP-Referer", "http://localhost:8080"))
        .and(body_partial_json(json!({
            "model": "mistralai/mistral-7b-instruct",
            "max_tokens": 800,
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "What is Article 21?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Article 21: ...")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenRouterProvider::new(settings(&server))?;
    let text = provider.complete(&payload()).await?;

    assert_eq!(text, "Article 21: ...");
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_maps_to_api_error_with_detail() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error": "invalid credentials"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenRouterProvider::new(settings(&server))?;
    let err = provider.complete(&payload()).await.expect_err("must fail");

    match err {
        AnswerError::CompletionApi { status, detail } => {
            assert_eq!(status, 401);
            assert!(detail.contains("invalid credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_choices_is_malformed_response() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = OpenRouterProvider::new(settings(&server))?;
    let err = provider.complete(&payload()).await.expect_err("must fail");

    assert!(matches!(err, AnswerError::MalformedCompletion(_)));
    Ok(())
}

#[tokio::test]
async fn test_unexpected_body_shape_is_malformed_response() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = OpenRouterProvider::new(settings(&server))?;
    let err = provider.complete(&payload()).await.expect_err("must fail");

    assert!(matches!(err, AnswerError::MalformedCompletion(_)));
    Ok(())
}

#[tokio::test]
async fn test_transient_failure_is_retried_up_to_the_bound() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    // First attempt gets a 500, the retry succeeds.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("flaky"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("recovered")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = settings(&server);
    config.max_retries = 1;
    let provider = OpenRouterProvider::new(config)?;

    let text = provider.complete(&payload()).await?;
    assert_eq!(text, "recovered");
    Ok(())
}

#[tokio::test]
async fn test_client_errors_are_not_retried() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = settings(&server);
    config.max_retries = 3;
    let provider = OpenRouterProvider::new(config)?;

    let err = provider.complete(&payload()).await.expect_err("must fail");
    assert!(matches!(
        err,
        AnswerError::CompletionApi { status: 400, .. }
    ));
    Ok(())
}

#[tokio::test]
async fn test_slow_upstream_surfaces_as_timeout() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = settings(&server);
    config.timeout_secs = 1;
    let provider = OpenRouterProvider::new(config)?;

    let err = provider.complete(&payload()).await.expect_err("must fail");
    assert!(matches!(err, AnswerError::CompletionTimeout));
    Ok(())
}

#[tokio::test]
async fn test_missing_api_key_fails_at_construction() {
    let config = CompletionSettings {
        api_key: String::new(),
        ..CompletionSettings::default()
    };

    let err = OpenRouterProvider::new(config).expect_err("must fail");
    assert!(matches!(err, AnswerError::MissingApiKey));
}
