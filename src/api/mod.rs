//! The three operations behind a single dispatch enum.
//!
//! Using an enum instead of trait objects keeps dispatch simple and
//! lets each operation return its own envelope through one tagged
//! `Outcome`. All three take the assembled conversation; moderation
//! and tokenization flatten it to text themselves.

pub mod chat;
pub mod moderation;
pub mod tokenize;

use crate::error::Error;
use crate::input::{self, Message};
use serde::Deserialize;

/// Enum-based dispatch over the operations a command can run.
pub enum Invoker {
    Chat(chat::ChatClient),
    Moderate(moderation::ModerationClient),
    Tokenize,
}

/// Tagged result of an invocation, handed to the renderer.
#[derive(Debug)]
pub enum Outcome {
    Chat(chat::ChatResponse),
    Moderation(moderation::ModerationResponse),
    Tokenization(tokenize::Tokenization),
}

impl Invoker {
    /// Chat completion against api.openai.com with the given key.
    pub fn chat(key: String) -> Self {
        Invoker::Chat(chat::ChatClient::new(key))
    }

    /// Content moderation against api.openai.com with the given key.
    pub fn moderate(key: String) -> Self {
        Invoker::Moderate(moderation::ModerationClient::new(key))
    }

    /// Local cl100k_base tokenization; needs no key.
    pub fn tokenize() -> Self {
        Invoker::Tokenize
    }

    /// Run the operation on an assembled conversation.
    pub async fn invoke(&self, messages: Vec<Message>) -> Result<Outcome, Error> {
        match self {
            Invoker::Chat(client) => Ok(Outcome::Chat(client.complete(messages).await?)),
            Invoker::Moderate(client) => {
                let text = input::flatten(&messages);
                Ok(Outcome::Moderation(client.moderate(text).await?))
            }
            Invoker::Tokenize => {
                let text = input::flatten(&messages);
                let tokenization = tokenize::Tokenizer::new()?.encode(&text)?;
                Ok(Outcome::Tokenization(tokenization))
            }
        }
    }

    /// Short operation name for logs and the progress indicator.
    pub fn describe(&self) -> &'static str {
        match self {
            Invoker::Chat(_) => "chat completion",
            Invoker::Moderate(_) => "moderation",
            Invoker::Tokenize => "tokenization",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Turn a non-2xx response into an opaque invocation error, keeping
/// the message the API put in its error envelope when it parses.
pub(crate) async fn error_from_response(
    operation: &'static str,
    response: reqwest::Response,
) -> Error {
    let status = response.status();
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.error.message,
        Err(_) => "Unknown error".to_string(),
    };
    Error::Invocation {
        operation,
        message: format!("status {status}: {message}"),
    }
}
