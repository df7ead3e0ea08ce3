//! OpenAI-compatible adapter for condensation and market summaries.
//!
//! Defaults to Gemini's OpenAI-compatible endpoint; works with OpenAI, Azure OpenAI,
//! Ollama or any other chat-completions API.

use super::prompts::{condense_prompt, market_summary_prompt, truncate_chars};
use crate::domain::{CondensedArticle, DomainError};
use crate::ports::LlmPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// OpenAI-compatible LLM adapter.
///
/// Can be configured to work with:
/// - Gemini (generativelanguage.googleapis.com, OpenAI compatibility layer)
/// - OpenAI API (api.openai.com)
/// - Ollama (localhost)
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    /// Characters of article content forwarded to the model.
    max_chars: usize,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_url` - Chat completions endpoint
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gemini-2.0-flash-lite", "gpt-4o-mini")
    /// * `max_chars` - Content truncation limit for condensation
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        api_key: String,
        model: String,
        max_chars: usize,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            model,
            max_chars,
        }
    }

    /// Strip a surrounding markdown code fence some models add to plain-text answers.
    fn strip_code_fence(raw_text: &str) -> String {
        let trimmed = raw_text.trim();
        if !trimmed.starts_with("```") {
            return trimmed.to_string();
        }
        // Drop the opening fence line (with optional language tag).
        let without_prefix = match trimmed.find('\n') {
            Some(nl) => &trimmed[nl + 1..],
            None => trimmed.trim_start_matches('`'),
        };
        let body = without_prefix
            .trim_end()
            .strip_suffix("```")
            .unwrap_or(without_prefix);
        body.trim().to_string()
    }

    /// POST one user message and return the first choice's text.
    async fn complete(&self, prompt: String) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Llm(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "LLM API returned error");
            return Err(DomainError::Llm(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Llm(format!("Failed to parse API response: {}", e)))?;

        let raw_content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::Llm("No response choices returned".to_string()))?;

        debug!(raw_len = raw_content.len(), "received LLM response");
        Ok(Self::strip_code_fence(&raw_content))
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl LlmPort for OpenAiAdapter {
    async fn condense(&self, title: &str, content: &str) -> Result<String, DomainError> {
        let preview = truncate_chars(content, self.max_chars);
        info!(
            title,
            content_len = content.len(),
            sent_len = preview.len(),
            "condensing article"
        );

        let condensed = self.complete(condense_prompt(title, preview)).await?;
        info!(
            words = condensed.split_whitespace().count(),
            "condensation complete"
        );
        Ok(condensed)
    }

    async fn market_summary(
        &self,
        ticker: &str,
        articles: &[CondensedArticle],
    ) -> Result<String, DomainError> {
        info!(ticker, articles = articles.len(), "requesting market summary");
        let summary = self
            .complete(market_summary_prompt(ticker, articles))
            .await?;
        info!(ticker, summary_len = summary.len(), "market summary complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence_plain() {
        assert_eq!(OpenAiAdapter::strip_code_fence("  Plain text.\n"), "Plain text.");
    }

    #[test]
    fn test_strip_code_fence_markdown() {
        let input = "```markdown\n## Overall Market Sentiment\nPositive\n```";
        assert_eq!(
            OpenAiAdapter::strip_code_fence(input),
            "## Overall Market Sentiment\nPositive"
        );
    }

    #[test]
    fn test_strip_code_fence_no_lang() {
        let input = "```\nCondensed body\n```";
        assert_eq!(OpenAiAdapter::strip_code_fence(input), "Condensed body");
    }

    #[test]
    fn test_response_with_null_content_parses() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
