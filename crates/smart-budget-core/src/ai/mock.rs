//! Mock backend for testing
//!
//! Useful for unit tests and development without a reachable LLM.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Text returned by generate_text; `None` makes it fail
    pub response: Option<String>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            response: Some(
                "Set aside a fixed share of every paycheck before you spend. Small, steady savings add up fast!"
                    .to_string(),
            ),
        }
    }

    /// Create an unhealthy mock backend whose requests fail
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            response: None,
        }
    }

    /// Respond with fixed text
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            healthy: true,
            response: Some(text.into()),
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        self.response
            .clone()
            .ok_or_else(|| Error::InvalidData("Mock backend configured to fail".into()))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
