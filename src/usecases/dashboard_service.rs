//! Dashboard use case. Builds the full report for one ticker.
//!
//! Order per ticker: price history → snapshot → news → articles → sentiment →
//! market summary. Each step runs to completion before the next starts.

use super::{ArticleService, SentimentService};
use crate::domain::{
    AiAnalysis, AnalysisOutcome, CondensedArticle, DateRange, DomainError, NewsItem, NewsQuery,
    TickerReport,
};
use crate::ports::{LlmPort, MarketDataPort, NewsSourcePort, ProgressPort};
use std::sync::Arc;
use tracing::{info, warn};

/// Summary text when nothing reached the LLM.
pub const NO_ARTICLES_SUMMARY: &str = "No articles available for analysis";

pub struct DashboardService {
    news: Arc<dyn NewsSourcePort>,
    market: Arc<dyn MarketDataPort>,
    articles: ArticleService,
    sentiment: SentimentService,
    llm: Arc<dyn LlmPort>,
    /// News items fed into the AI stage.
    max_articles: usize,
}

impl DashboardService {
    pub fn new(
        news: Arc<dyn NewsSourcePort>,
        market: Arc<dyn MarketDataPort>,
        articles: ArticleService,
        sentiment: SentimentService,
        llm: Arc<dyn LlmPort>,
        max_articles: usize,
    ) -> Self {
        Self {
            news,
            market,
            articles,
            sentiment,
            llm,
            max_articles,
        }
    }

    /// Build the report for one ticker.
    ///
    /// Market-data failure is returned as an error for this ticker. News and AI
    /// failures are folded into the report so the rest of it still renders.
    pub async fn analyze_ticker(
        &self,
        ticker: &str,
        range: DateRange,
        progress: &dyn ProgressPort,
    ) -> Result<TickerReport, DomainError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(DomainError::InvalidInput("ticker must not be empty".into()));
        }
        info!(ticker, range = %range, "analyzing ticker");

        let history = self.market.history(ticker, &range).await?;
        let snapshot = self.market.snapshot(ticker, &history).await?;

        let query = NewsQuery::for_ticker(ticker)
            .with_company(snapshot.company_name.as_deref())
            .with_range(range);
        let (news, news_error) = match self.news.search(&query).await {
            Ok(items) => (items, None),
            Err(e) => {
                warn!(ticker, error = %e, "news retrieval failed");
                (Vec::new(), Some(e.to_string()))
            }
        };

        let analysis = self.run_analysis(ticker, &news, progress).await;
        progress.finish();

        Ok(TickerReport {
            ticker: ticker.to_string(),
            range,
            snapshot,
            history,
            news,
            news_error,
            analysis,
        })
    }

    async fn run_analysis(
        &self,
        ticker: &str,
        news: &[NewsItem],
        progress: &dyn ProgressPort,
    ) -> AnalysisOutcome {
        if news.is_empty() {
            return AnalysisOutcome::NoArticles;
        }
        let selected = &news[..news.len().min(self.max_articles)];

        progress.stage(20, "Extracting and condensing articles...");
        let articles = self.articles.process_articles(selected).await;
        if articles.is_empty() {
            warn!(ticker, "no article could be extracted");
            return AnalysisOutcome::NothingCondensed;
        }

        progress.stage(40, "Analyzing sentiment...");
        let sentiments = match self.sentiment.score_articles(&articles).await {
            Ok(s) => s,
            Err(e) => return AnalysisOutcome::Failed(e.to_string()),
        };

        progress.stage(60, "Calculating aggregate sentiment...");
        let aggregate = match self.sentiment.aggregate(&sentiments) {
            Ok(a) => a,
            Err(e) => return AnalysisOutcome::Failed(e.to_string()),
        };

        progress.stage(80, "Generating market summary...");
        let market_summary = self.market_summary(ticker, &articles).await;

        progress.stage(100, "Analysis complete!");
        AnalysisOutcome::Complete(AiAnalysis {
            articles,
            sentiments,
            aggregate,
            market_summary,
        })
    }

    /// LLM market summary, or the degraded text when the LLM is unavailable.
    pub async fn market_summary(&self, ticker: &str, articles: &[CondensedArticle]) -> String {
        if articles.is_empty() {
            return NO_ARTICLES_SUMMARY.to_string();
        }
        match self.llm.market_summary(ticker, articles).await {
            Ok(summary) => summary,
            Err(e @ DomainError::NotConfigured(_)) => e.to_string(),
            Err(e) => {
                warn!(ticker, error = %e, "summary generation failed");
                format!("Summary generation failed: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{DisabledLlmAdapter, MockLlmAdapter};
    use crate::adapters::sentiment::LexiconClassifier;
    use crate::domain::{ExtractedArticle, MarketSnapshot, PriceBar, SentimentBucket};
    use crate::ports::ArticleExtractorPort;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct StubNews {
        result: Result<Vec<NewsItem>, String>,
        queries: Mutex<Vec<NewsQuery>>,
    }

    #[async_trait::async_trait]
    impl NewsSourcePort for StubNews {
        fn name(&self) -> &str {
            "stub"
        }

        async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, DomainError> {
            if let Ok(mut q) = self.queries.lock() {
                q.push(query.clone());
            }
            self.result.clone().map_err(DomainError::News)
        }
    }

    struct StubMarket {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl MarketDataPort for StubMarket {
        async fn history(
            &self,
            _ticker: &str,
            range: &DateRange,
        ) -> Result<Vec<PriceBar>, DomainError> {
            if self.fail {
                return Err(DomainError::MarketData("No data found".into()));
            }
            Ok(vec![PriceBar {
                date: range.end,
                close: 100.0,
                volume: Some(1_000),
            }])
        }

        async fn snapshot(
            &self,
            _ticker: &str,
            history: &[PriceBar],
        ) -> Result<MarketSnapshot, DomainError> {
            Ok(MarketSnapshot {
                last_price: history.last().map(|b| b.close),
                market_cap: None,
                volume: history.last().and_then(|b| b.volume),
                company_name: Some("Apple Inc.".into()),
            })
        }
    }

    /// Counts calls so tests can check the article cap.
    #[derive(Default)]
    struct CountingExtractor {
        calls: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl ArticleExtractorPort for CountingExtractor {
        async fn extract(&self, _url: &str) -> Result<Option<ExtractedArticle>, DomainError> {
            if let Ok(mut calls) = self.calls.lock() {
                *calls += 1;
            }
            Ok(Some(ExtractedArticle {
                title: "Apple beats estimates".into(),
                text: "Apple shares surge to a record after earnings beat estimates and strong growth."
                    .repeat(3),
                summary: String::new(),
                authors: vec![],
                publish_date: None,
                top_image: None,
            }))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        stages: Mutex<Vec<u64>>,
        finished: Mutex<bool>,
    }

    impl ProgressPort for RecordingProgress {
        fn stage(&self, percent: u64, _message: &str) {
            if let Ok(mut s) = self.stages.lock() {
                s.push(percent);
            }
        }

        fn finish(&self) {
            if let Ok(mut f) = self.finished.lock() {
                *f = true;
            }
        }
    }

    fn news(n: usize) -> Vec<NewsItem> {
        (0..n)
            .map(|i| NewsItem {
                title: format!("Story {}", i),
                url: format!("https://example.com/{}", i),
                published_at: "today".into(),
                snippet: None,
                source: None,
            })
            .collect()
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
        )
    }

    fn service_with_news(
        news: Arc<StubNews>,
        market_fails: bool,
        extractor: Arc<CountingExtractor>,
        llm: Arc<dyn LlmPort>,
    ) -> DashboardService {
        DashboardService::new(
            news,
            Arc::new(StubMarket { fail: market_fails }),
            ArticleService::new(extractor, Arc::clone(&llm), 4000),
            SentimentService::new(Arc::new(LexiconClassifier::new())),
            llm,
            5,
        )
    }

    fn stub_news(result: Result<Vec<NewsItem>, String>) -> Arc<StubNews> {
        Arc::new(StubNews {
            result,
            queries: Mutex::new(Vec::new()),
        })
    }

    fn service(
        news: Result<Vec<NewsItem>, String>,
        market_fails: bool,
        extractor: Arc<CountingExtractor>,
        llm: Arc<dyn LlmPort>,
    ) -> DashboardService {
        service_with_news(stub_news(news), market_fails, extractor, llm)
    }

    #[tokio::test]
    async fn test_full_pipeline_caps_articles() {
        let extractor = Arc::new(CountingExtractor::default());
        let svc = service(
            Ok(news(8)),
            false,
            Arc::clone(&extractor),
            Arc::new(MockLlmAdapter::with_delay(0)),
        );
        let progress = RecordingProgress::default();
        let report = svc.analyze_ticker("AAPL", range(), &progress).await.unwrap();

        assert_eq!(report.news.len(), 8);
        assert_eq!(*extractor.calls.lock().unwrap(), 5);
        assert_eq!(*progress.stages.lock().unwrap(), vec![20, 40, 60, 80, 100]);
        assert!(*progress.finished.lock().unwrap());
        assert_eq!(report.snapshot.last_price, Some(100.0));

        let AnalysisOutcome::Complete(analysis) = report.analysis else {
            panic!("expected complete analysis");
        };
        assert_eq!(analysis.articles.len(), 5);
        assert_eq!(analysis.aggregate.total_articles, 5);
        assert_eq!(analysis.aggregate.sentiment_label, SentimentBucket::Bullish);
        assert!(analysis.market_summary.contains("AAPL"));
    }

    #[tokio::test]
    async fn test_missing_llm_key_still_scores() {
        let svc = service(
            Ok(news(2)),
            false,
            Arc::new(CountingExtractor::default()),
            Arc::new(DisabledLlmAdapter),
        );
        let report = svc
            .analyze_ticker("AAPL", range(), &crate::ports::NoopProgress)
            .await
            .unwrap();
        let AnalysisOutcome::Complete(analysis) = report.analysis else {
            panic!("expected complete analysis");
        };
        assert_eq!(analysis.market_summary, "LLM API key not configured");
        assert_eq!(analysis.sentiments.len(), 2);
    }

    #[tokio::test]
    async fn test_news_failure_is_reported() {
        let svc = service(
            Err("all sources failed".into()),
            false,
            Arc::new(CountingExtractor::default()),
            Arc::new(MockLlmAdapter::with_delay(0)),
        );
        let report = svc
            .analyze_ticker("AAPL", range(), &crate::ports::NoopProgress)
            .await
            .unwrap();
        assert!(report.news.is_empty());
        assert!(report.news_error.unwrap().contains("all sources failed"));
        assert_eq!(report.analysis, AnalysisOutcome::NoArticles);
    }

    #[tokio::test]
    async fn test_market_failure_is_error() {
        let svc = service(
            Ok(news(1)),
            true,
            Arc::new(CountingExtractor::default()),
            Arc::new(MockLlmAdapter::with_delay(0)),
        );
        let err = svc
            .analyze_ticker("ZZZZ", range(), &crate::ports::NoopProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MarketData(_)));
    }

    #[tokio::test]
    async fn test_blank_ticker_is_rejected() {
        let news = stub_news(Ok(news(1)));
        let svc = service_with_news(
            Arc::clone(&news),
            false,
            Arc::new(CountingExtractor::default()),
            Arc::new(MockLlmAdapter::with_delay(0)),
        );
        let err = svc
            .analyze_ticker("   ", range(), &crate::ports::NoopProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(news.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_news_query_carries_company_name() {
        let news = stub_news(Ok(vec![]));
        let svc = service_with_news(
            Arc::clone(&news),
            false,
            Arc::new(CountingExtractor::default()),
            Arc::new(MockLlmAdapter::with_delay(0)),
        );
        svc.analyze_ticker(" AAPL ", range(), &crate::ports::NoopProgress)
            .await
            .unwrap();
        let queries = news.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].ticker, "AAPL");
        assert_eq!(queries[0].company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(queries[0].range, Some(range()));
    }

    #[tokio::test]
    async fn test_empty_summary_text() {
        let svc = service(
            Ok(vec![]),
            false,
            Arc::new(CountingExtractor::default()),
            Arc::new(MockLlmAdapter::with_delay(0)),
        );
        assert_eq!(svc.market_summary("AAPL", &[]).await, NO_ARTICLES_SUMMARY);
    }
}
