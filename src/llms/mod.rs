use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod openai;

pub use openai::OpenAI;

/// OpenAI-compatible inference endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://models.github.ai/inference";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("completion returned no choices")]
    EmptyResponse,
}

#[async_trait]
pub trait LLM: Send + Sync {
    /// Send one conversation to the endpoint and return the first choice's
    /// message content.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
