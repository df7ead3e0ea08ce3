//! Hugging Face inference adapter for FinBERT (`ProsusAI/finbert`).

use super::{LabelScore, top_label};
use crate::adapters::ai::prompts::truncate_chars;
use crate::domain::{Classification, DomainError};
use crate::ports::SentimentClassifierPort;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// FinBERT accepts 512 tokens; a few thousand characters stays under that after tokenization.
const MAX_INPUT_CHARS: usize = 2000;

pub struct HfClassifier {
    client: Client,
    url: String,
    token: String,
}

impl HfClassifier {
    pub fn new(client: Client, url: String, token: String) -> Self {
        Self { client, url, token }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// The endpoint answers `[[{label, score}, ...]]` for a single input, some
/// deployments `[{label, score}, ...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Parse an inference body into the top label.
pub fn parse_response(body: &str) -> Result<Classification, DomainError> {
    let parsed: InferenceResponse = serde_json::from_str(body).map_err(|e| {
        DomainError::Classifier(format!(
            "unexpected response ({}): {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })?;
    let scores = match parsed {
        InferenceResponse::Nested(mut outer) => {
            if outer.is_empty() {
                Vec::new()
            } else {
                outer.swap_remove(0)
            }
        }
        InferenceResponse::Flat(scores) => scores,
    };
    top_label(&scores)
}

#[async_trait::async_trait]
impl SentimentClassifierPort for HfClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, DomainError> {
        let request = InferenceRequest {
            inputs: truncate_chars(text, MAX_INPUT_CHARS),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Classifier(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Classifier(format!("body unreadable: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, body = %body, "classifier returned error");
            return Err(DomainError::Classifier(format!(
                "API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let classification = parse_response(&body)?;
        debug!(
            label = %classification.label,
            score = classification.score,
            "classified"
        );
        Ok(classification)
    }
}
