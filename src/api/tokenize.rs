//! Local tokenizer backed by the cl100k_base vocabulary.
//!
//! Tokenization never leaves the machine; the vocabulary ships with
//! the binary and matches what gpt-3.5-turbo class models use.

use crate::error::Error;
use serde::Serialize;
use tiktoken_rs::{cl100k_base, CoreBPE};

pub struct Tokenizer {
    bpe: CoreBPE,
}

impl Tokenizer {
    /// Load the cl100k_base vocabulary.
    pub fn new() -> Result<Self, Error> {
        let bpe = cl100k_base().map_err(|e| Error::invocation("tokenization", e))?;
        Ok(Self { bpe })
    }

    /// Encode text into ids paired with the span each id covers.
    pub fn encode(&self, text: &str) -> Result<Tokenization, Error> {
        let ids = self.bpe.encode_ordinary(text);
        let pieces = self
            .bpe
            .split_by_token(text, false)
            .map_err(|e| Error::invocation("tokenization", e))?;

        let tokens = ids
            .into_iter()
            .zip(pieces)
            .map(|(id, text)| Token { id, text })
            .collect();

        Ok(Tokenization { tokens })
    }
}

/// One token id together with the text it was cut from.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub id: usize,
    pub text: String,
}

/// The full token sequence for one input.
#[derive(Debug, Clone, Serialize)]
pub struct Tokenization {
    pub tokens: Vec<Token>,
}

impl Tokenization {
    pub fn count(&self) -> usize {
        self.tokens.len()
    }
}
