//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use news2sentiment::adapters::ai::{DisabledLlmAdapter, MockLlmAdapter, OpenAiAdapter};
use news2sentiment::adapters::extraction::HtmlArticleExtractor;
use news2sentiment::adapters::market::YahooMarketData;
use news2sentiment::adapters::news::{
    FallbackNewsSource, GoogleNewsRss, GoogleNewsSearch, NewsApiSource,
};
use news2sentiment::adapters::report::HtmlDashboard;
use news2sentiment::adapters::sentiment::{HfClassifier, LexiconClassifier};
use news2sentiment::adapters::ui::tui::TuiInputPort;
use news2sentiment::ports::{
    ArticleExtractorPort, InputPort, LlmPort, MarketDataPort, NewsSourcePort, ReportPort,
    SentimentClassifierPort,
};
use news2sentiment::shared::config::AppConfig;
use news2sentiment::shared::http::build_client;
use news2sentiment::usecases::{ArticleService, DashboardService, SentimentService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    news2sentiment::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        AppConfig::default()
    });

    let client = build_client(cfg.http_timeout_secs_or_default())
        .map_err(|e| anyhow::anyhow!("HTTP client init failed: {}", e))?;

    // --- News: search scraping, then RSS, then NewsAPI when keyed ---
    let mut sources: Vec<Arc<dyn NewsSourcePort>> = vec![
        Arc::new(GoogleNewsSearch::new(client.clone())),
        Arc::new(GoogleNewsRss::new(client.clone())),
    ];
    match cfg.news_api_key() {
        Some(key) => {
            info!("NewsAPI fallback enabled");
            sources.push(Arc::new(NewsApiSource::new(client.clone(), key)));
        }
        None => info!("NEWS_API_KEY not set, NewsAPI fallback disabled"),
    }
    let news: Arc<dyn NewsSourcePort> = Arc::new(FallbackNewsSource::new(sources));

    // --- LLM ---
    let llm: Arc<dyn LlmPort> = if cfg.is_ai_mock() {
        warn!("N2S_AI_MOCK set, using mock LLM adapter");
        Arc::new(MockLlmAdapter::new())
    } else if let Some(key) = cfg.ai_api_key() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "LLM enabled with OpenAI-compatible adapter"
        );
        Arc::new(OpenAiAdapter::new(
            client.clone(),
            cfg.ai_api_url_or_default(),
            key,
            cfg.ai_model_or_default(),
            cfg.condense_max_chars_or_default(),
        ))
    } else {
        warn!("GEMINI_API_KEY not set, condensation and summaries disabled");
        Arc::new(DisabledLlmAdapter)
    };

    // --- Sentiment classifier ---
    let classifier: Arc<dyn SentimentClassifierPort> = match cfg.hf_api_token() {
        Some(token) => {
            info!(url = %cfg.classifier_url_or_default(), "hosted classifier enabled");
            Arc::new(HfClassifier::new(
                client.clone(),
                cfg.classifier_url_or_default(),
                token,
            ))
        }
        None => {
            warn!("HF_API_TOKEN not set, using offline lexicon classifier");
            Arc::new(LexiconClassifier::new())
        }
    };

    let extractor: Arc<dyn ArticleExtractorPort> = Arc::new(HtmlArticleExtractor::new(
        client.clone(),
        cfg.min_article_chars_or_default(),
    ));
    let market: Arc<dyn MarketDataPort> = Arc::new(YahooMarketData::new(client));

    let reports_dir = PathBuf::from(cfg.reports_dir_or_default());
    info!(path = %reports_dir.display(), "reports directory");
    let report: Arc<dyn ReportPort> = Arc::new(HtmlDashboard::new(reports_dir));

    // --- Services ---
    let article_service =
        ArticleService::new(extractor, Arc::clone(&llm), cfg.condense_max_chars_or_default());
    let sentiment_service = SentimentService::new(classifier);
    let dashboard = Arc::new(DashboardService::new(
        news,
        market,
        article_service,
        sentiment_service,
        llm,
        cfg.max_articles_or_default(),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        dashboard,
        report,
        cfg.lookback_days_or_default(),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
