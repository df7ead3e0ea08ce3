//! Stand-in LLM used when no API key is configured. Every call reports NotConfigured,
//! which the use cases turn into placeholder text.

use crate::domain::{CondensedArticle, DomainError};
use crate::ports::LlmPort;

#[derive(Debug, Default)]
pub struct DisabledLlmAdapter;

fn not_configured() -> DomainError {
    DomainError::NotConfigured("LLM API key".to_string())
}

#[async_trait::async_trait]
impl LlmPort for DisabledLlmAdapter {
    async fn condense(&self, _title: &str, _content: &str) -> Result<String, DomainError> {
        Err(not_configured())
    }

    async fn market_summary(
        &self,
        _ticker: &str,
        _articles: &[CondensedArticle],
    ) -> Result<String, DomainError> {
        Err(not_configured())
    }
}
