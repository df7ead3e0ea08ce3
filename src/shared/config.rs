//! Application configuration. API credentials, endpoints, pipeline limits.

use serde::Deserialize;

/// Gemini's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_AI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.0-flash-lite";
/// Hugging Face hosted inference for FinBERT.
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://router.huggingface.co/hf-inference/models/ProsusAI/finbert";

/// Articles per ticker that enter the AI pipeline.
pub const DEFAULT_MAX_ARTICLES: usize = 5;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 20;
/// Characters of article body forwarded to the LLM.
pub const DEFAULT_CONDENSE_MAX_CHARS: usize = 4000;
/// Extracted bodies shorter than this (trimmed) are discarded.
pub const DEFAULT_MIN_ARTICLE_CHARS: usize = 100;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // LLM (condensation + market summary)
    // ─────────────────────────────────────────────────────────────────────────
    /// LLM API key. Read from N2S_AI_API_KEY, falls back to GEMINI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// OpenAI-compatible chat completions URL. Read from N2S_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Read from N2S_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Use the offline mock LLM instead of the API. Read from N2S_AI_MOCK.
    #[serde(default)]
    pub ai_mock: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Sentiment classifier
    // ─────────────────────────────────────────────────────────────────────────
    /// Hugging Face token. Read from N2S_HF_API_TOKEN, falls back to HF_API_TOKEN.
    #[serde(default)]
    pub hf_api_token: Option<String>,

    /// Classifier inference URL. Read from N2S_CLASSIFIER_URL.
    #[serde(default)]
    pub classifier_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // News
    // ─────────────────────────────────────────────────────────────────────────
    /// NewsAPI key. Read from N2S_NEWS_API_KEY, falls back to NEWS_API_KEY.
    #[serde(default)]
    pub news_api_key: Option<String>,

    #[serde(default)]
    pub max_articles: Option<usize>,

    #[serde(default)]
    pub lookback_days: Option<u32>,

    #[serde(default)]
    pub condense_max_chars: Option<usize>,

    #[serde(default)]
    pub min_article_chars: Option<usize>,

    // ─────────────────────────────────────────────────────────────────────────
    // Output / transport
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory for rendered HTML dashboards. Read from N2S_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,

    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("N2S").try_parsing(true));
        if let Ok(path) = std::env::var("N2S_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // LLM helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the LLM API key from config, N2S_AI_API_KEY or GEMINI_API_KEY.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("N2S_AI_API_KEY").ok())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
    }

    pub fn is_ai_mock(&self) -> bool {
        self.ai_mock.unwrap_or(false)
    }

    /// Returns true if the LLM is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Classifier helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn hf_api_token(&self) -> Option<String> {
        self.hf_api_token
            .clone()
            .or_else(|| std::env::var("HF_API_TOKEN").ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn classifier_url_or_default(&self) -> String {
        self.classifier_url
            .clone()
            .unwrap_or_else(|| DEFAULT_CLASSIFIER_URL.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // News / pipeline helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn news_api_key(&self) -> Option<String> {
        self.news_api_key
            .clone()
            .or_else(|| std::env::var("NEWS_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn max_articles_or_default(&self) -> usize {
        self.max_articles
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_ARTICLES)
    }

    pub fn lookback_days_or_default(&self) -> u32 {
        self.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS)
    }

    pub fn condense_max_chars_or_default(&self) -> usize {
        self.condense_max_chars
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CONDENSE_MAX_CHARS)
    }

    pub fn min_article_chars_or_default(&self) -> usize {
        self.min_article_chars
            .unwrap_or(DEFAULT_MIN_ARTICLE_CHARS)
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }

    pub fn http_timeout_secs_or_default(&self) -> u64 {
        self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }
}
