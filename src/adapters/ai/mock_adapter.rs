//! Mock LLM adapter for running the pipeline without API calls.
//!
//! Returns deterministic text derived from its input.

use super::prompts::CONDENSE_WORD_TARGET;
use crate::domain::{CondensedArticle, DomainError};
use crate::ports::LlmPort;
use std::time::Duration;
use tracing::info;

/// Mock LLM adapter.
///
/// Condensation returns the first `CONDENSE_WORD_TARGET` words of the content.
/// Simulates network latency with configurable delay.
pub struct MockLlmAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockLlmAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockLlmAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmPort for MockLlmAdapter {
    async fn condense(&self, title: &str, content: &str) -> Result<String, DomainError> {
        info!(title, content_len = content.len(), "[MOCK] Simulating condensation");
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(content
            .split_whitespace()
            .take(CONDENSE_WORD_TARGET)
            .collect::<Vec<_>>()
            .join(" "))
    }

    async fn market_summary(
        &self,
        ticker: &str,
        articles: &[CondensedArticle],
    ) -> Result<String, DomainError> {
        info!(ticker, articles = articles.len(), "[MOCK] Simulating market summary");
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let themes: String = articles
            .iter()
            .map(|a| format!("- {}\n", a.title))
            .collect();
        Ok(format!(
            "## Overall Market Sentiment\n[MOCK] Simulated summary of {} articles about {}.\n\n\
             ## Key Themes\n{}\n\
             ## Investment Outlook\nConfigure a real LLM API key for production analysis.",
            articles.len(),
            ticker,
            themes
        ))
    }
}
