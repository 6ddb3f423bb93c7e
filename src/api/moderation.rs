//! Content moderation client for the OpenAI API.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const MODERATIONS_URL: &str = "https://api.openai.com/v1/moderations";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the moderations endpoint.
pub struct ModerationClient {
    key: String,
    client: reqwest::Client,
}

impl ModerationClient {
    pub fn new(key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { key, client }
    }

    /// Classify the input text and return the verdict envelope.
    pub async fn moderate(&self, input: String) -> Result<ModerationResponse, Error> {
        let request = ModerationRequest { input };

        debug!(bytes = request.input.len(), "sending moderation request");

        let response = self
            .client
            .post(MODERATIONS_URL)
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::invocation("moderation", e))?;

        if !response.status().is_success() {
            return Err(super::error_from_response("moderation", response).await);
        }

        response
            .json::<ModerationResponse>()
            .await
            .map_err(|e| Error::invocation("moderation", e))
    }
}

#[derive(Debug, Serialize)]
struct ModerationRequest {
    input: String,
}

/// Verdict envelope as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub id: String,
    pub model: String,
    pub results: Vec<ModerationResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    pub categories: CategoryFlags,
    pub category_scores: CategoryScores,
}

/// Per-category verdicts. The API names four of these with slashes
/// and hyphens, which serde maps back to field names here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFlags {
    pub hate: bool,
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: bool,
    #[serde(rename = "self-harm")]
    pub self_harm: bool,
    pub sexual: bool,
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: bool,
    pub violence: bool,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: bool,
}

/// Per-category confidence scores, same naming as [`CategoryFlags`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub hate: f64,
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: f64,
    #[serde(rename = "self-harm")]
    pub self_harm: f64,
    pub sexual: f64,
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: f64,
    pub violence: f64,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: f64,
}

/// One category paired with its verdict and score, for display.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRow {
    pub name: &'static str,
    pub flagged: bool,
    pub score: f64,
}

impl ModerationResult {
    /// All seven categories in their canonical display order.
    pub fn rows(&self) -> [CategoryRow; 7] {
        let flags = &self.categories;
        let scores = &self.category_scores;
        [
            CategoryRow { name: "hate", flagged: flags.hate, score: scores.hate },
            CategoryRow {
                name: "hate/threatening",
                flagged: flags.hate_threatening,
                score: scores.hate_threatening,
            },
            CategoryRow { name: "self-harm", flagged: flags.self_harm, score: scores.self_harm },
            CategoryRow { name: "sexual", flagged: flags.sexual, score: scores.sexual },
            CategoryRow {
                name: "sexual/minors",
                flagged: flags.sexual_minors,
                score: scores.sexual_minors,
            },
            CategoryRow { name: "violence", flagged: flags.violence, score: scores.violence },
            CategoryRow {
                name: "violence/graphic",
                flagged: flags.violence_graphic,
                score: scores.violence_graphic,
            },
        ]
    }
}
