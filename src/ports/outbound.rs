//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    Classification, CondensedArticle, DateRange, DomainError, ExtractedArticle, MarketSnapshot,
    NewsItem, NewsQuery, PriceBar, TickerReport,
};
use std::path::PathBuf;

/// News source (search scraping, RSS, REST API).
#[async_trait::async_trait]
pub trait NewsSourcePort: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Search news for the query. `Ok(vec![])` means "nothing found", not failure.
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, DomainError>;
}

/// Article extraction from a URL.
#[async_trait::async_trait]
pub trait ArticleExtractorPort: Send + Sync {
    /// Download and parse the article.
    ///
    /// Returns `Ok(None)` when the page parsed but its body is below the length floor.
    async fn extract(&self, url: &str) -> Result<Option<ExtractedArticle>, DomainError>;
}

/// Generative text API.
#[async_trait::async_trait]
pub trait LlmPort: Send + Sync {
    /// Condense one article (target 350 words; requested, not verified).
    async fn condense(&self, title: &str, content: &str) -> Result<String, DomainError>;

    /// Write the market summary for a ticker from its condensed articles.
    async fn market_summary(
        &self,
        ticker: &str,
        articles: &[CondensedArticle],
    ) -> Result<String, DomainError>;
}

/// Pretrained three-class sentiment classifier.
#[async_trait::async_trait]
pub trait SentimentClassifierPort: Send + Sync {
    /// Highest-probability label and its probability.
    async fn classify(&self, text: &str) -> Result<Classification, DomainError>;
}

/// Market data (price history and headline metrics).
#[async_trait::async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Daily closes within the range, oldest first. Empty when the market has no data.
    async fn history(&self, ticker: &str, range: &DateRange) -> Result<Vec<PriceBar>, DomainError>;

    /// Last price, market cap and volume. `history` is the already-fetched series,
    /// used as the last-resort fallback for price and volume.
    async fn snapshot(
        &self,
        ticker: &str,
        history: &[PriceBar],
    ) -> Result<MarketSnapshot, DomainError>;
}

/// Renders a ticker report to a file.
#[async_trait::async_trait]
pub trait ReportPort: Send + Sync {
    async fn write(&self, report: &TickerReport) -> Result<PathBuf, DomainError>;
}
