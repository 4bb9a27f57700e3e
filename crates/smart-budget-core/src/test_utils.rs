//! Test utilities for smart-budget-core
//!
//! A mock LLM server speaking both the Gemini `generateContent` and the
//! Ollama `/api/generate` protocols.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::oneshot;

/// What the mock server answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with this text
    Text(String),
    /// Answer every request with a 500
    ServerError,
}

/// Mock LLM server for testing
pub struct MockLlmServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockLlmServer {
    /// Start a server replying with a fixed tip
    pub async fn start() -> Self {
        Self::start_with(MockReply::Text(
            "Try the 50/30/20 rule this month. You're closer than you think!".to_string(),
        ))
        .await
    }

    /// Start the mock server on an available port
    pub async fn start_with(reply: MockReply) -> Self {
        let reply = Arc::new(reply);
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_ollama_generate))
            // `:model` also captures `<model>:generateContent`
            .route(
                "/v1beta/models/:model",
                get(handle_gemini_model).post(handle_gemini_generate),
            )
            .with_state(reply);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockLlmServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_tags() -> Json<serde_json::Value> {
    Json(json!({ "models": [{ "name": "llama3.2:latest" }] }))
}

async fn handle_gemini_model() -> Json<serde_json::Value> {
    Json(json!({ "name": "models/gemini-3-flash-preview" }))
}

async fn handle_ollama_generate(State(reply): State<Arc<MockReply>>) -> Response {
    match reply.as_ref() {
        MockReply::Text(text) => Json(json!({ "response": text, "done": true })).into_response(),
        MockReply::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn handle_gemini_generate(State(reply): State<Arc<MockReply>>) -> Response {
    match reply.as_ref() {
        MockReply::Text(text) => Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
        }))
        .into_response(),
        MockReply::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
