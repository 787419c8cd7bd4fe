//! Shared helpers for the server integration tests.
//!
//! Each test binary compiles this module independently and uses a different
//! subset of it.
#![allow(dead_code)]

use samvidhan::providers::ai::openrouter::CompletionSettings;
use samvidhan_server::config::AppConfig;
use samvidhan_server::run;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

/// A test configuration: in-memory corpus, completion endpoint pointed at
/// the given URL (normally a wiremock server), no retries to keep failure
/// tests fast.
pub fn test_config(completion_url: &str) -> AppConfig {
    AppConfig {
        port: 0,
        db_url: ":memory:".to_string(),
        corpus_file: None,
        completion: CompletionSettings {
            api_url: format!("{completion_url}/api/v1/chat/completions"),
            api_key: "test-key".to_string(),
            referer: "http://localhost:8080".to_string(),
            app_title: "Samvidhan".to_string(),
            timeout_secs: 2,
            max_retries: 0,
        },
        classifier: Default::default(),
        generation: Default::default(),
    }
}

/// Spawns the server on a random port and returns its base address.
pub async fn spawn_app(config: AppConfig) -> String {
    setup_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    tokio::spawn(async move {
        if let Err(e) = run(listener, config).await {
            eprintln!("Server error: {e}");
        }
    });

    // Give the server a moment to start.
    sleep(Duration::from_millis(100)).await;

    address
}

/// The OpenAI-compatible success body the completion mock returns.
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}
