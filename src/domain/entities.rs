//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/HTML types here; adapters map their wire formats into these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Article stub returned by a news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    /// Source-provided date text (RSS pubDate, "2 hours ago", or `%Y-%m-%d %H:%M`).
    pub published_at: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Search request for a news source.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub ticker: String,
    pub company_name: Option<String>,
    pub range: Option<DateRange>,
}

impl NewsQuery {
    pub fn for_ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: None,
            range: None,
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Company name to search alongside the ticker. Blank names are ignored.
    pub fn with_company(mut self, name: Option<&str>) -> Self {
        self.company_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        self
    }
}

/// Parsed article page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub text: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub top_image: Option<String>,
}

/// Outcome of the LLM condensation step for one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Condensation {
    Condensed,
    NotConfigured,
    Failed(String),
}

/// Article after condensation. Input to sentiment scoring and the market summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedArticle {
    pub title: String,
    /// LLM output, or the placeholder text when condensation did not happen.
    pub condensed_text: String,
    pub condensation: Condensation,
    /// Truncated article body that was sent to the LLM.
    pub source_text: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub top_image: Option<String>,
    pub url: String,
    pub published_at: String,
}

impl CondensedArticle {
    /// Text to score and summarize: the condensed text when the LLM produced one,
    /// otherwise the source text (placeholders are never scored).
    pub fn analysis_text(&self) -> &str {
        match self.condensation {
            Condensation::Condensed => &self.condensed_text,
            _ => &self.source_text,
        }
    }
}

/// Three-way classifier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a classifier label (case-insensitive; accepts FinBERT and LABEL_n styles).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "label_0" => Some(Self::Positive),
            "negative" | "neg" | "label_1" => Some(Self::Negative),
            "neutral" | "neu" | "label_2" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw classifier output: top label and its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: SentimentLabel,
    pub score: f64,
}

/// Per-article sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Classifier probability in [0, 1].
    pub confidence: f64,
    /// +confidence, -confidence or 0.0 depending on the label.
    pub signed_score: f64,
}

/// Categorical bucket of the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentBucket {
    #[serde(rename = "BULLISH")]
    Bullish,
    #[serde(rename = "SLIGHTLY BULLISH")]
    SlightlyBullish,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "SLIGHTLY BEARISH")]
    SlightlyBearish,
    #[serde(rename = "BEARISH")]
    Bearish,
}

impl SentimentBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "BULLISH",
            Self::SlightlyBullish => "SLIGHTLY BULLISH",
            Self::Neutral => "NEUTRAL",
            Self::SlightlyBearish => "SLIGHTLY BEARISH",
            Self::Bearish => "BEARISH",
        }
    }

    /// Hex colour used by the gauge.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Bullish => "#4CAF50",
            Self::SlightlyBullish => "#8BC34A",
            Self::Neutral => "#FF9800",
            Self::SlightlyBearish => "#FF5722",
            Self::Bearish => "#F44336",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Bullish => "🚀",
            Self::SlightlyBullish => "📈",
            Self::Neutral => "😐",
            Self::SlightlyBearish => "📉",
            Self::Bearish => "🔻",
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate of all per-article results for one ticker. Full precision; round when displaying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSentiment {
    pub final_score: f64,
    pub sentiment_label: SentimentBucket,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub total_articles: usize,
    pub confidence: f64,
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range; swaps the bounds if given in reverse.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// `days` days back from `end`, clamped to the earliest representable date.
    pub fn lookback(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Unix seconds at start-of-day of `start` and end-of-day of `end` (UTC).
    pub fn unix_bounds(&self) -> (i64, i64) {
        let from = self.start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let to = self.end.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() + 86_399;
        (from, to)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: Option<u64>,
}

/// Headline metrics for a ticker. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub last_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<u64>,
    /// Listed company name, used to widen news searches.
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Result of the AI stage when it ran to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub articles: Vec<CondensedArticle>,
    pub sentiments: Vec<SentimentResult>,
    pub aggregate: AggregateSentiment,
    pub market_summary: String,
}

/// What happened in the AI stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Complete(AiAnalysis),
    /// No news to analyze.
    NoArticles,
    /// News existed but no article could be extracted.
    NothingCondensed,
    Failed(String),
}

/// Everything shown for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReport {
    pub ticker: String,
    pub range: DateRange,
    pub snapshot: MarketSnapshot,
    pub history: Vec<PriceBar>,
    pub news: Vec<NewsItem>,
    /// Set when every news source failed (as opposed to returning nothing).
    pub news_error: Option<String>,
    pub analysis: AnalysisOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label_parse_finbert_style() {
        assert_eq!(SentimentLabel::parse("positive"), Some(SentimentLabel::Positive));
        assert_eq!(SentimentLabel::parse("NEGATIVE"), Some(SentimentLabel::Negative));
        assert_eq!(SentimentLabel::parse(" Neutral "), Some(SentimentLabel::Neutral));
        assert_eq!(SentimentLabel::parse("mixed"), None);
    }

    #[test]
    fn test_date_range_swaps_reversed_bounds() {
        let r = DateRange::new(date(2025, 8, 7), date(2025, 8, 1));
        assert_eq!(r.start, date(2025, 8, 1));
        assert_eq!(r.end, date(2025, 8, 7));
    }

    #[test]
    fn test_date_range_unix_bounds_cover_whole_days() {
        let r = DateRange::new(date(2024, 1, 1), date(2024, 1, 2));
        let (from, to) = r.unix_bounds();
        assert_eq!(from, 1_704_067_200);
        assert_eq!(to, 1_704_067_200 + 2 * 86_400 - 1);
    }

    #[test]
    fn test_lookback() {
        let r = DateRange::lookback(date(2025, 3, 21), 20);
        assert_eq!(r.start, date(2025, 3, 1));
    }

    #[test]
    fn test_lookback_out_of_range_clamps() {
        let r = DateRange::lookback(date(2025, 3, 21), u32::MAX);
        assert_eq!(r.start, NaiveDate::MIN);
        assert_eq!(r.end, date(2025, 3, 21));
    }

    #[test]
    fn test_news_query_with_company() {
        let q = NewsQuery::for_ticker("AAPL").with_company(Some(" Apple Inc. "));
        assert_eq!(q.company_name.as_deref(), Some("Apple Inc."));
        let q = NewsQuery::for_ticker("AAPL").with_company(Some("  "));
        assert_eq!(q.company_name, None);
    }

    #[test]
    fn test_analysis_text_skips_placeholder() {
        let mut article = CondensedArticle {
            title: "t".into(),
            condensed_text: "LLM API key not configured".into(),
            condensation: Condensation::NotConfigured,
            source_text: "Original body".into(),
            summary: String::new(),
            authors: vec![],
            publish_date: None,
            top_image: None,
            url: "https://example.com".into(),
            published_at: String::new(),
        };
        assert_eq!(article.analysis_text(), "Original body");
        article.condensation = Condensation::Condensed;
        article.condensed_text = "Short version".into();
        assert_eq!(article.analysis_text(), "Short version");
    }
}
