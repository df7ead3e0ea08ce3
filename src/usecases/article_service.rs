//! Article pipeline: extract each news URL, then condense it with the LLM.
//!
//! Strictly sequential. Extraction failures drop the article; LLM failures keep it
//! with a placeholder text and a non-`Condensed` status.

use crate::adapters::ai::prompts::truncate_chars;
use crate::domain::{Condensation, CondensedArticle, DomainError, ExtractedArticle, NewsItem};
use crate::ports::{ArticleExtractorPort, LlmPort};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ArticleService {
    extractor: Arc<dyn ArticleExtractorPort>,
    llm: Arc<dyn LlmPort>,
    /// Characters of body text forwarded to the LLM.
    max_chars: usize,
}

impl ArticleService {
    pub fn new(
        extractor: Arc<dyn ArticleExtractorPort>,
        llm: Arc<dyn LlmPort>,
        max_chars: usize,
    ) -> Self {
        Self {
            extractor,
            llm,
            max_chars,
        }
    }

    /// Extract and condense every item, in order. Items whose page could not be
    /// extracted are skipped, so the result may be shorter than `items`.
    pub async fn process_articles(&self, items: &[NewsItem]) -> Vec<CondensedArticle> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let article = match self.extractor.extract(&item.url).await {
                Ok(Some(article)) => article,
                Ok(None) => {
                    debug!(url = %item.url, "article body below length floor, skipped");
                    continue;
                }
                Err(e) => {
                    warn!(url = %item.url, error = %e, "extraction failed, skipped");
                    continue;
                }
            };
            info!(index = i + 1, total = items.len(), title = %item.title, "condensing article");
            out.push(self.condense(item, article).await);
        }
        info!(
            requested = items.len(),
            condensed = out.len(),
            "article processing complete"
        );
        out
    }

    async fn condense(&self, item: &NewsItem, article: ExtractedArticle) -> CondensedArticle {
        let title = if article.title.trim().is_empty() {
            item.title.clone()
        } else {
            article.title
        };
        let source_text = truncate_chars(&article.text, self.max_chars).to_string();

        let (condensed_text, condensation) = match self.llm.condense(&title, &source_text).await {
            Ok(text) => (text, Condensation::Condensed),
            Err(e @ DomainError::NotConfigured(_)) => (e.to_string(), Condensation::NotConfigured),
            Err(e) => {
                warn!(title = %title, error = %e, "condensation failed");
                (
                    format!("Condensation failed: {}", e),
                    Condensation::Failed(e.to_string()),
                )
            }
        };

        CondensedArticle {
            title,
            condensed_text,
            condensation,
            source_text,
            summary: article.summary,
            authors: article.authors,
            publish_date: article.publish_date,
            top_image: article.top_image,
            url: item.url.clone(),
            published_at: item.published_at.clone(),
        }
    }
}
