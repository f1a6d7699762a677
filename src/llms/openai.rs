use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, LLM, LlmError};

/// Client for OpenAI-compatible chat-completion endpoints.
///
/// GitHub Models speaks this protocol, so the default deployment needs
/// nothing beyond a bearer token. Exactly one request is sent per `chat`
/// call; there is no retry and no timeout beyond reqwest's defaults.
pub struct OpenAI {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub client: Client,
    pub system_prompt: String,
    token: String,
}

impl OpenAI {
    pub fn new(model: String, base_url: String, token: String, system_prompt: String) -> Self {
        Self {
            model,
            base_url,
            temperature: 0.2,
            max_tokens: 1500,
            client: Client::new(),
            system_prompt,
            token,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    async fn make_request(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            messages: &'a [ChatMessage],
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct Response {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }

        #[derive(Deserialize)]
        struct ApiError {
            error: ApiErrorBody,
        }

        #[derive(Deserialize)]
        struct ApiErrorBody {
            message: String,
        }

        let request = Request {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: Response = serde_json::from_str(&body)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        Ok(choice.message.content)
    }
}

#[async_trait]
impl LLM for OpenAI {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let mut all_messages = vec![ChatMessage {
            role: "system".to_string(),
            content: self.system_prompt.clone(),
        }];
        all_messages.extend_from_slice(messages);

        self.make_request(all_messages).await
    }
}
