//! Implements InputPort. Inquire prompts plus a coloured terminal dashboard.
//!
//! Loop: tickers → dates → one dashboard per ticker → analyse again or exit.

use super::progress::BarProgress;
use crate::domain::{
    AggregateSentiment, AiAnalysis, AnalysisOutcome, DateRange, DomainError, TickerReport,
};
use crate::ports::{InputPort, ReportPort};
use crate::shared::format::{
    ConfidenceTier, format_confidence, format_market_cap, format_price, format_score,
    format_volume, hex_to_rgb, sparkline,
};
use crate::usecases::DashboardService;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, Weekday};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use inquire::error::InquireError;
use inquire::ui::{RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, DateSelect, Text};
use std::io::{Write, stdout};
use std::sync::Arc;
use tracing::{error, info};

const GAUGE_WIDTH: usize = 30;
const ACCENT: &str = "#58A6FF";
const MUTED: &str = "#9E9E9E";

/// Green prompt prefix and answers for every inquire prompt.
pub fn apply_theme() {
    let (r, g, b) = hex_to_rgb("#4CAF50");
    let green = inquire::ui::Color::Rgb { r, g, b };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(green))
        .with_answer(StyleSheet::new().with_fg(green));
    inquire::set_global_render_config(config);
}

/// Split a comma-separated ticker list: trimmed, upper-cased, blanks dropped.
pub fn parse_tickers(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Horizontal gauge of a 0..=100 score.
pub fn gauge_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Gauge row: bar, emoji, score out of 100 and bucket label.
fn gauge_line(aggregate: &AggregateSentiment) -> String {
    let bucket = aggregate.sentiment_label;
    format!(
        "{} {}  {}/100  {}",
        gauge_bar(aggregate.final_score, GAUGE_WIDTH),
        bucket.emoji(),
        format_score(aggregate.final_score),
        bucket
    )
}

/// Percent change from the first to the last close.
fn change_percent(first: f64, last: f64) -> Option<f64> {
    (first.abs() > f64::EPSILON).then(|| (last - first) / first * 100.0)
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// `None` when the user cancelled (Esc / Ctrl-C).
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(ui_err(e)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal output
// ─────────────────────────────────────────────────────────────────────────────

fn colored(text: &str, hex: &str) {
    let (r, g, b) = hex_to_rgb(hex);
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
    let _ = out.execute(Print(text));
    let _ = out.execute(ResetColor);
}

fn line(text: &str) {
    let _ = stdout().execute(Print(format!("{}\r\n", text)));
}

fn heading(text: &str) {
    let mut out = stdout();
    let _ = out.execute(Print("\r\n"));
    let _ = out.execute(SetAttribute(Attribute::Bold));
    colored(text, ACCENT);
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(Print("\r\n"));
}

fn render_overview(report: &TickerReport) {
    heading("📊 Stock Overview");
    let s = &report.snapshot;
    if let Some(name) = &s.company_name {
        colored(&format!("  {}\r\n", name), MUTED);
    }
    line(&format!("  Current Price  {}", format_price(s.last_price)));
    line(&format!("  Market Cap     {}", format_market_cap(s.market_cap)));
    line(&format!("  Volume         {}", format_volume(s.volume)));
}

fn render_prices(report: &TickerReport) {
    heading("📈 Price Trends");
    let (Some(first), Some(last)) = (report.history.first(), report.history.last()) else {
        colored("  No price data available.\r\n", MUTED);
        return;
    };
    let closes: Vec<f64> = report.history.iter().map(|b| b.close).collect();
    line(&format!("  {}", sparkline(&closes)));
    let mut summary = format!(
        "  {} {} → {} {}",
        first.date,
        format_price(Some(first.close)),
        last.date,
        format_price(Some(last.close))
    );
    if let Some(change) = change_percent(first.close, last.close) {
        summary.push_str(&format!(" ({:+.2}%)", change));
    }
    line(&summary);
}

fn render_news(report: &TickerReport) {
    heading("📰 Recent News");
    if let Some(err) = &report.news_error {
        colored(&format!("  News retrieval failed: {}\r\n", err), "#F44336");
    }
    if report.news.is_empty() {
        colored(&format!("  No articles found for {}.\r\n", report.ticker), MUTED);
        return;
    }
    for (i, item) in report.news.iter().enumerate() {
        line(&format!("  {}. {}", i + 1, item.title));
        colored(&format!("     {}\r\n", item.url), ACCENT);
        let source = item
            .source
            .as_deref()
            .map(|s| format!(" · {}", s))
            .unwrap_or_default();
        colored(&format!("     {}{}\r\n", item.published_at, source), MUTED);
    }
}

fn render_analysis(analysis: &AnalysisOutcome) {
    heading("🤖 AI Analysis");
    let AiAnalysis {
        aggregate,
        market_summary,
        ..
    } = match analysis {
        AnalysisOutcome::Complete(a) => a,
        AnalysisOutcome::NoArticles => {
            colored("  No news articles available for analysis.\r\n", MUTED);
            return;
        }
        AnalysisOutcome::NothingCondensed => {
            colored("  No articles could be extracted and condensed.\r\n", MUTED);
            return;
        }
        AnalysisOutcome::Failed(msg) => {
            colored(&format!("  Analysis failed: {}\r\n", msg), "#F44336");
            return;
        }
    };

    colored(
        &format!("  {}\r\n", gauge_line(aggregate)),
        aggregate.sentiment_label.color(),
    );

    line("  Article Breakdown");
    colored(&format!("    Positive  {}\r\n", aggregate.positive_count), "#4CAF50");
    colored(&format!("    Negative  {}\r\n", aggregate.negative_count), "#F44336");
    colored(&format!("    Neutral   {}\r\n", aggregate.neutral_count), "#FF9800");

    let _ = stdout().execute(Print("  Analysis Confidence  "));
    colored(
        &format!("{}\r\n", format_confidence(aggregate.confidence)),
        ConfidenceTier::of(aggregate.confidence).color(),
    );
    line(&format!("  Articles Analysed    {}", aggregate.total_articles));

    heading("💭 Market Mood Summary");
    for l in market_summary.lines() {
        line(&format!("  {}", l));
    }
}

fn render_report(report: &TickerReport) {
    render_overview(report);
    render_prices(report);
    render_news(report);
    render_analysis(&report.analysis);
    let _ = stdout().flush();
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    dashboard: Arc<DashboardService>,
    report: Arc<dyn ReportPort>,
    lookback_days: u32,
}

impl TuiInputPort {
    pub fn new(
        dashboard: Arc<DashboardService>,
        report: Arc<dyn ReportPort>,
        lookback_days: u32,
    ) -> Self {
        Self {
            dashboard,
            report,
            lookback_days,
        }
    }

    fn prompt_range(&self, today: NaiveDate) -> Result<Option<DateRange>, DomainError> {
        let default_start = DateRange::lookback(today, self.lookback_days).start;
        let Some(start) = answered(
            DateSelect::new("Start date:")
                .with_default(default_start)
                .with_max_date(today)
                .with_week_start(Weekday::Mon)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(end) = answered(
            DateSelect::new("End date:")
                .with_default(today)
                .with_min_date(start)
                .with_max_date(today)
                .with_week_start(Weekday::Mon)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        Ok(Some(DateRange::new(start, end)))
    }

    async fn show_ticker(&self, ticker: &str, range: DateRange) {
        let _ = stdout().execute(Print("\r\n"));
        let _ = stdout().execute(SetAttribute(Attribute::Bold));
        colored(&format!("═══ {} ═══  {}\r\n", ticker, range), "#4CAF50");
        let _ = stdout().execute(SetAttribute(Attribute::Reset));

        let progress = BarProgress::new();
        let report = match self.dashboard.analyze_ticker(ticker, range, &progress).await {
            Ok(report) => report,
            Err(e) => {
                error!(ticker, error = %e, "ticker failed");
                colored(
                    &format!("  Error fetching data for {}: {}\r\n", ticker, e),
                    "#F44336",
                );
                return;
            }
        };

        render_report(&report);

        match self.report.write(&report).await {
            Ok(path) => colored(
                &format!("\r\n  HTML dashboard: {}\r\n", path.display()),
                MUTED,
            ),
            Err(e) => colored(&format!("\r\n  {}\r\n", e), "#F44336"),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(raw) = answered(
                Text::new("Enter stock tickers (comma-separated):")
                    .with_default("AAPL")
                    .with_help_message("e.g. AAPL, MSFT, NVDA")
                    .prompt(),
            )?
            else {
                break;
            };
            let tickers = parse_tickers(&raw);
            if tickers.is_empty() {
                colored("Please enter at least one ticker.\r\n", "#FF9800");
                continue;
            }

            let today = Local::now().date_naive();
            let Some(range) = self.prompt_range(today)? else {
                break;
            };
            info!(tickers = ?tickers, range = %range, "starting analysis");

            for ticker in &tickers {
                self.show_ticker(ticker, range).await;
            }

            let again = answered(
                Confirm::new("Analyse another set of tickers?")
                    .with_default(false)
                    .prompt(),
            )?;
            if again != Some(true) {
                break;
            }
        }
        info!("session finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tickers() {
        assert_eq!(parse_tickers(" aapl, msft ,,nvda "), vec!["AAPL", "MSFT", "NVDA"]);
        assert!(parse_tickers(" , ").is_empty());
    }

    #[test]
    fn test_gauge_bar() {
        assert_eq!(gauge_bar(50.0, 10), "█████░░░░░");
        assert_eq!(gauge_bar(150.0, 4), "████");
        assert_eq!(gauge_bar(-3.0, 4), "░░░░");
    }

    #[test]
    fn test_gauge_line_rounds_for_display() {
        let aggregate = AggregateSentiment {
            final_score: 75.04,
            sentiment_label: crate::domain::SentimentBucket::Bullish,
            positive_count: 3,
            negative_count: 1,
            neutral_count: 0,
            total_articles: 4,
            confidence: 0.8504,
        };
        let line = gauge_line(&aggregate);
        assert!(line.ends_with("75.0/100  BULLISH"));
        assert!(line.contains("🚀"));
        assert_eq!(aggregate.final_score, 75.04);
        assert_eq!(format_confidence(aggregate.confidence), "0.850");
    }

    #[test]
    fn test_change_percent() {
        assert_eq!(change_percent(100.0, 110.0), Some(10.0));
        assert_eq!(change_percent(0.0, 5.0), None);
    }

    #[test]
    fn test_answered_maps_cancel_to_none() {
        assert_eq!(answered::<u8>(Err(InquireError::OperationCanceled)).unwrap(), None);
        assert_eq!(answered(Ok(3u8)).unwrap(), Some(3));
    }
}
