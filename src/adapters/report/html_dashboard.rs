//! Self-contained HTML dashboard per ticker.
//!
//! Rendered from `templates/dashboard.html` with askama, which escapes every
//! interpolated value. Inline CSS, an inline SVG line chart of closes and a
//! conic-gradient gauge. No scripts and no external assets, so the file opens
//! offline.

use crate::domain::{AiAnalysis, AnalysisOutcome, DomainError, PriceBar, TickerReport};
use crate::ports::ReportPort;
use crate::shared::format::{
    ConfidenceTier, format_confidence, format_market_cap, format_price, format_score,
    format_volume,
};
use askama::Template;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 220.0;
const CHART_PAD: f64 = 12.0;

/// Polyline `points` for the closes, scaled into the chart box. Empty below two bars.
pub fn chart_points(history: &[PriceBar]) -> String {
    if history.len() < 2 {
        return String::new();
    }
    let (min, max) = history
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
            (lo.min(b.close), hi.max(b.close))
        });
    let span = if max - min > f64::EPSILON { max - min } else { 1.0 };
    let step = (CHART_WIDTH - 2.0 * CHART_PAD) / (history.len() - 1) as f64;
    let usable = CHART_HEIGHT - 2.0 * CHART_PAD;

    history
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let x = CHART_PAD + i as f64 * step;
            let y = CHART_PAD + (max - b.close) / span * usable;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

struct ChartView {
    width: f64,
    height: f64,
    points: String,
    from: String,
    to: String,
}

impl ChartView {
    fn of(history: &[PriceBar]) -> Option<Self> {
        let (first, last) = (history.first()?, history.last()?);
        Some(Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            points: chart_points(history),
            from: format!("{} {}", first.date, format_price(Some(first.close))),
            to: format!("{} {}", last.date, format_price(Some(last.close))),
        })
    }
}

/// Gauge, breakdown, confidence bar and summary, formatted for display.
struct GaugeView<'a> {
    color: &'static str,
    degrees: String,
    score: String,
    emoji: &'static str,
    label: &'static str,
    positive: usize,
    negative: usize,
    neutral: usize,
    total: usize,
    confidence: String,
    confidence_percent: String,
    confidence_color: &'static str,
    summary: &'a str,
}

impl<'a> GaugeView<'a> {
    fn of(analysis: &'a AiAnalysis) -> Self {
        let aggregate = &analysis.aggregate;
        let bucket = aggregate.sentiment_label;
        Self {
            color: bucket.color(),
            degrees: format!("{:.1}", aggregate.final_score.clamp(0.0, 100.0) * 3.6),
            score: format_score(aggregate.final_score),
            emoji: bucket.emoji(),
            label: bucket.as_str(),
            positive: aggregate.positive_count,
            negative: aggregate.negative_count,
            neutral: aggregate.neutral_count,
            total: aggregate.total_articles,
            confidence: format_confidence(aggregate.confidence),
            confidence_percent: format!(
                "{:.1}",
                (aggregate.confidence * 100.0).clamp(0.0, 100.0)
            ),
            confidence_color: ConfidenceTier::of(aggregate.confidence).color(),
            summary: &analysis.market_summary,
        }
    }
}

enum AnalysisView<'a> {
    Complete(GaugeView<'a>),
    Notice(&'static str),
    Failed(&'a str),
}

impl<'a> AnalysisView<'a> {
    fn of(outcome: &'a AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Complete(a) => Self::Complete(GaugeView::of(a)),
            AnalysisOutcome::NoArticles => {
                Self::Notice("No news articles available for analysis.")
            }
            AnalysisOutcome::NothingCondensed => {
                Self::Notice("No articles could be extracted and condensed.")
            }
            AnalysisOutcome::Failed(msg) => Self::Failed(msg),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    report: &'a TickerReport,
    range: String,
    price: String,
    market_cap: String,
    volume: String,
    chart: Option<ChartView>,
    analysis: AnalysisView<'a>,
}

impl<'a> DashboardPage<'a> {
    fn new(report: &'a TickerReport) -> Self {
        Self {
            report,
            range: report.range.to_string(),
            price: format_price(report.snapshot.last_price),
            market_cap: format_market_cap(report.snapshot.market_cap),
            volume: format_volume(report.snapshot.volume),
            chart: ChartView::of(&report.history),
            analysis: AnalysisView::of(&report.analysis),
        }
    }
}

/// Full HTML document for a report.
pub fn render(report: &TickerReport) -> Result<String, DomainError> {
    DashboardPage::new(report)
        .render()
        .map_err(|e| DomainError::Report(format!("Failed to render report: {}", e)))
}

/// Writes `<TICKER>_<end-date>.html` under the reports directory.
pub struct HtmlDashboard {
    reports_dir: PathBuf,
}

impl HtmlDashboard {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    fn file_name(report: &TickerReport) -> String {
        let safe: String = report
            .ticker
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        format!("{}_{}.html", safe, report.range.end)
    }
}

#[async_trait::async_trait]
impl ReportPort for HtmlDashboard {
    async fn write(&self, report: &TickerReport) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))?;

        let html = render(report)?;
        let path = self.reports_dir.join(Self::file_name(report));
        fs::write(&path, html)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to write report: {}", e)))?;

        info!(ticker = %report.ticker, path = %path.display(), "dashboard written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AggregateSentiment, DateRange, MarketSnapshot, NewsItem, SentimentBucket};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn report(analysis: AnalysisOutcome) -> TickerReport {
        TickerReport {
            ticker: "AAPL".to_string(),
            range: DateRange::new(date(1), date(7)),
            snapshot: MarketSnapshot {
                last_price: Some(213.25),
                market_cap: Some(3.18e12),
                volume: Some(41_000_000),
                company_name: Some("Apple Inc.".to_string()),
            },
            history: vec![
                PriceBar { date: date(1), close: 202.38, volume: None },
                PriceBar { date: date(4), close: 203.35, volume: None },
                PriceBar { date: date(5), close: 213.25, volume: Some(41_000_000) },
            ],
            news: vec![NewsItem {
                title: "Apple <beats> & \"soars\"".to_string(),
                url: "https://example.com/a?x=1&y=2".to_string(),
                published_at: "2 hours ago".to_string(),
                snippet: None,
                source: Some("Reuters".to_string()),
            }],
            news_error: None,
            analysis,
        }
    }

    fn complete() -> AnalysisOutcome {
        AnalysisOutcome::Complete(AiAnalysis {
            articles: vec![],
            sentiments: vec![],
            aggregate: AggregateSentiment {
                final_score: 75.04,
                sentiment_label: SentimentBucket::Bullish,
                positive_count: 2,
                negative_count: 0,
                neutral_count: 1,
                total_articles: 3,
                confidence: 0.8504,
            },
            market_summary: "## Overall Market Sentiment\n<script>".to_string(),
        })
    }

    #[test]
    fn test_render_escapes_interpolated_text() {
        let html = render(&report(complete())).unwrap();
        assert!(html.contains("Apple &lt;beats&gt; &amp; "));
        assert!(!html.contains("<beats>"));
        assert!(!html.contains("\"soars\""));
        assert!(html.contains("https://example.com/a?x=1&amp;y=2"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_escapes_failure_message() {
        let html = render(&report(AnalysisOutcome::Failed("<b>boom</b>".into()))).unwrap();
        assert!(html.contains("Analysis failed: &lt;b&gt;boom&lt;/b&gt;"));
    }

    #[test]
    fn test_render_gauge_and_metrics() {
        let html = render(&report(complete())).unwrap();
        assert!(html.contains("conic-gradient(#4CAF50 0deg 270.1deg"));
        assert!(html.contains("<div class=\"score\">75.0</div>"));
        assert!(html.contains("<p>0.850 · Articles analysed: 3</p>"));
        assert!(html.contains("width:85.0%"));
        assert!(html.contains("Apple Inc."));
        assert!(html.contains("$213.25"));
        assert!(html.contains("3.18T"));
        assert!(html.contains("41,000,000"));
        assert!(html.contains("Positive: 2"));
        assert!(html.contains("background:#4CAF50"));
    }

    #[test]
    fn test_render_empty_states() {
        let mut r = report(AnalysisOutcome::NoArticles);
        r.history.clear();
        r.news.clear();
        let html = render(&r).unwrap();
        assert!(html.contains("No price data available."));
        assert!(html.contains("No articles found for AAPL."));
        assert!(html.contains("No news articles available for analysis."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_chart_points_span_box() {
        let r = report(AnalysisOutcome::NoArticles);
        let points = chart_points(&r.history);
        let first = points.split(' ').next().unwrap();
        let last = points.split(' ').last().unwrap();
        // Lowest close at the bottom edge, highest at the top.
        assert_eq!(first, "12.0,208.0");
        assert_eq!(last, "628.0,12.0");
        assert!(chart_points(&r.history[..1]).is_empty());
    }

    #[tokio::test]
    async fn test_write_creates_named_file() {
        let dir = std::env::temp_dir().join(format!("n2s-report-{}", std::process::id()));
        let port = HtmlDashboard::new(&dir);
        let path = port.write(&report(complete())).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "AAPL_2025-08-07.html");
        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(body.starts_with("<!DOCTYPE html>"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
