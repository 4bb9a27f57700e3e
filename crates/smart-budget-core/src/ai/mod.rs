//! Pluggable AI backend abstraction for budget tips
//!
//! # Architecture
//!
//! - `AIBackend` trait: text generation plus health/identity reporting
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `OllamaBackend`, `MockBackend`
//! - `tips`: prompt building and the never-failing tip entry point
//!
//! # Configuration
//!
//! Backends are built from [`AiConfig`](crate::config::AiConfig), which the
//! config loader fills from `config.toml` and these environment variables:
//! - `AI_BACKEND`: gemini (default), ollama, mock, none
//! - `GEMINI_API_KEY`: required for gemini
//! - `GEMINI_MODEL`: default gemini-3-flash-preview
//! - `OLLAMA_HOST`: required for ollama
//! - `OLLAMA_MODEL`: default llama3.2

mod gemini;
mod mock;
mod ollama;
pub mod tips;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use tips::{build_tip_prompt, get_budget_tip};

use std::time::Duration;

use async_trait::async_trait;

use crate::config::AiConfig;
use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate a free-text completion for the prompt
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
#[derive(Clone)]
pub enum AIClient {
    /// Google Gemini (generateContent API)
    Gemini(GeminiBackend),
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Build a client from configuration
    ///
    /// Returns None when the backend is disabled or missing what it needs
    /// (an API key for gemini, a host for ollama).
    pub fn from_config(config: &AiConfig) -> Option<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        match config.backend.as_str() {
            "gemini" => GeminiBackend::from_config(config, timeout).map(AIClient::Gemini),
            "ollama" => OllamaBackend::from_config(config, timeout).map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            "none" | "off" | "" => None,
            other => {
                tracing::warn!(backend = %other, "Unknown AI backend, tips disabled");
                None
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a Gemini backend directly
    pub fn gemini(host: &str, model: &str, api_key: &str) -> Self {
        AIClient::Gemini(GeminiBackend::new(host, model, api_key))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.generate_text(prompt).await,
            AIClient::Ollama(b) => b.generate_text(prompt).await,
            AIClient::Mock(b) => b.generate_text(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Gemini(b) => b.health_check().await,
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.model(),
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.host(),
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
