//! Chat completions client for the OpenAI API.

use crate::error::Error;
use crate::input::Message;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const CHAT_MODEL: &str = "gpt-3.5-turbo";
const CHAT_TEMPERATURE: f32 = 0.8;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the chat completions endpoint.
pub struct ChatClient {
    key: String,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { key, client }
    }

    /// Send the conversation and return the completion envelope.
    pub async fn complete(&self, messages: Vec<Message>) -> Result<ChatResponse, Error> {
        let request = ChatRequest {
            model: CHAT_MODEL.to_string(),
            temperature: CHAT_TEMPERATURE,
            messages,
        };

        debug!(
            messages = request.messages.len(),
            model = CHAT_MODEL,
            "sending chat completion request"
        );

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::invocation("chat completion", e))?;

        if !response.status().is_success() {
            return Err(super::error_from_response("chat completion", response).await);
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::invocation("chat completion", e))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<Message>,
}

/// Completion envelope as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Usage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the API returned any.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}
