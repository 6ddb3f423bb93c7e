//! Conversation assembly for the three commands.
//!
//! A conversation is an ordered list of role/content messages. The
//! `chat` command sends it as-is; `moderations` and `tokenize` flatten
//! it to a single string first. Order is chronological turn order and
//! is preserved through file load and prompt append.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who spoke a message. Anything else in a messages file is a decode
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Merge an optional messages file and an optional prompt into one
/// ordered conversation. File messages come first; a non-empty prompt
/// is appended as a single trailing user message. With neither source
/// the result is empty and downstream calls proceed with empty input.
pub fn assemble(file: Option<&Path>, prompt: Option<&str>) -> Result<Vec<Message>, Error> {
    let mut messages = match file {
        Some(path) => load_messages(path)?,
        None => Vec::new(),
    };

    if let Some(prompt) = prompt {
        if !prompt.is_empty() {
            messages.push(Message::user(prompt));
        }
    }

    Ok(messages)
}

/// Read and decode a messages file: a JSON array of `{role, content}`
/// objects. I/O and decode failures are reported as distinct errors.
pub fn load_messages(path: &Path) -> Result<Vec<Message>, Error> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;

    parse_messages(&contents).map_err(|source| Error::Decode {
        what: format!("messages file {}", path.display()),
        source,
    })
}

fn parse_messages(json: &str) -> Result<Vec<Message>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Collapse a conversation to the text the moderation and tokenize
/// operations consume: the `content` fields concatenated in order,
/// with nothing inserted between them.
pub fn flatten(messages: &[Message]) -> String {
    messages.iter().map(|m| m.content.as_str()).collect()
}
