//! Sentiment scoring over condensed articles.

use crate::domain::sentiment::{aggregate, validate_text};
use crate::domain::{AggregateSentiment, CondensedArticle, DomainError, SentimentResult};
use crate::ports::SentimentClassifierPort;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SentimentService {
    classifier: Arc<dyn SentimentClassifierPort>,
}

impl SentimentService {
    pub fn new(classifier: Arc<dyn SentimentClassifierPort>) -> Self {
        Self { classifier }
    }

    /// Classify one text. Text below the length floor is an error, never a skip.
    pub async fn score_text(&self, text: &str) -> Result<SentimentResult, DomainError> {
        validate_text(text)?;
        let classification = self.classifier.classify(text).await?;
        Ok(SentimentResult::from_classification(classification))
    }

    /// Score every article in order. The first failure aborts the whole batch.
    pub async fn score_articles(
        &self,
        articles: &[CondensedArticle],
    ) -> Result<Vec<SentimentResult>, DomainError> {
        let mut results = Vec::with_capacity(articles.len());
        for article in articles {
            let result = self.score_text(article.analysis_text()).await?;
            debug!(
                title = %article.title,
                label = %result.label,
                confidence = result.confidence,
                "article scored"
            );
            results.push(result);
        }
        Ok(results)
    }

    /// Aggregate already-scored results.
    pub fn aggregate(&self, results: &[SentimentResult]) -> Result<AggregateSentiment, DomainError> {
        let agg = aggregate(results)?;
        info!(
            score = agg.final_score,
            bucket = %agg.sentiment_label,
            articles = agg.total_articles,
            "aggregate sentiment"
        );
        Ok(agg)
    }
}
