//! Yahoo Finance market data (chart + quote endpoints).
//!
//! History comes from the v8 chart API. Snapshot fields follow a fallback chain:
//! chart meta (fast path) → quote endpoint ("info" bundle) → last historical bar.

use crate::domain::{DateRange, DomainError, MarketSnapshot, PriceBar};
use crate::ports::MarketDataPort;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

pub struct YahooMarketData {
    client: Client,
}

impl YahooMarketData {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::MarketData(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::MarketData(format!("body unreadable: {}", e)))?;
        if !status.is_success() {
            return Err(DomainError::MarketData(format!(
                "{} returned {}: {}",
                url,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        Ok(body)
    }

    async fn chart(
        &self,
        ticker: &str,
        query: &[(&str, String)],
    ) -> Result<ChartData, DomainError> {
        let url = format!("{}/{}", CHART_URL, ticker);
        let body = self.get_text(&url, query).await?;
        parse_chart(&body)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    regular_market_volume: Option<u64>,
    long_name: Option<String>,
    short_name: Option<String>,
}

/// Quick-path values from the 1-day chart meta.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FastQuote {
    pub price: Option<f64>,
    pub volume: Option<u64>,
    pub name: Option<String>,
}

fn fast_quote(meta: ChartMeta) -> FastQuote {
    FastQuote {
        price: meta.regular_market_price,
        volume: meta.regular_market_volume,
        name: meta.long_name.or(meta.short_name),
    }
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<QuoteInfo>,
}

/// Subset of the quote ("info") bundle.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInfo {
    pub market_cap: Option<f64>,
    pub regular_market_volume: Option<u64>,
    pub regular_market_price: Option<f64>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

fn parse_chart(body: &str) -> Result<ChartData, DomainError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| DomainError::MarketData(format!("failed to parse chart: {}", e)))?;
    if let Some(err) = envelope.chart.error {
        return Err(DomainError::MarketData(format!(
            "{}: {}",
            err.code, err.description
        )));
    }
    envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DomainError::MarketData("chart returned no result".to_string()))
}

/// Daily bars from a chart body. Bars with a null close are skipped.
pub fn parse_history(body: &str) -> Result<Vec<PriceBar>, DomainError> {
    Ok(bars(&parse_chart(body)?))
}

fn bars(data: &ChartData) -> Vec<PriceBar> {
    let Some(timestamps) = &data.timestamp else {
        return Vec::new();
    };
    let Some(quote) = data.indicators.quote.first() else {
        return Vec::new();
    };

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let close = quote.close.get(i).copied().flatten()?;
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some(PriceBar {
                date,
                close,
                volume: quote.volume.get(i).copied().flatten(),
            })
        })
        .collect()
}

/// First entry of a quote body.
pub fn parse_quote(body: &str) -> Result<QuoteInfo, DomainError> {
    let envelope: QuoteEnvelope = serde_json::from_str(body)
        .map_err(|e| DomainError::MarketData(format!("failed to parse quote: {}", e)))?;
    Ok(envelope
        .quote_response
        .result
        .into_iter()
        .next()
        .unwrap_or_default())
}

/// Merge the snapshot sources in priority order.
///
/// Price: last historical close, then quick-path price, then info price.
/// Volume: quick path, then info, then last historical volume.
/// Company name: quick path, then info (long name before short name).
pub fn merge_snapshot(
    history: &[PriceBar],
    fast: &FastQuote,
    info: Option<&QuoteInfo>,
) -> MarketSnapshot {
    let last_price = history
        .last()
        .map(|b| b.close)
        .or(fast.price)
        .or_else(|| info.and_then(|i| i.regular_market_price));
    let market_cap = info.and_then(|i| i.market_cap);
    let volume = fast
        .volume
        .or_else(|| info.and_then(|i| i.regular_market_volume))
        .or_else(|| history.last().and_then(|b| b.volume));
    let company_name = fast.name.clone().or_else(|| {
        info.and_then(|i| i.long_name.clone().or_else(|| i.short_name.clone()))
    });

    MarketSnapshot {
        last_price,
        market_cap,
        volume,
        company_name,
    }
}

#[async_trait::async_trait]
impl MarketDataPort for YahooMarketData {
    async fn history(&self, ticker: &str, range: &DateRange) -> Result<Vec<PriceBar>, DomainError> {
        let (period1, period2) = range.unix_bounds();
        let data = self
            .chart(
                ticker,
                &[
                    ("period1", period1.to_string()),
                    ("period2", period2.to_string()),
                    ("interval", "1d".to_string()),
                ],
            )
            .await?;
        let history = bars(&data);
        info!(ticker, bars = history.len(), range = %range, "price history loaded");
        Ok(history)
    }

    async fn snapshot(
        &self,
        ticker: &str,
        history: &[PriceBar],
    ) -> Result<MarketSnapshot, DomainError> {
        // Fast path: the 1-day chart carries price and volume but never market cap.
        let fast = match self
            .chart(
                ticker,
                &[("range", "1d".to_string()), ("interval", "1d".to_string())],
            )
            .await
        {
            Ok(data) => fast_quote(data.meta),
            Err(e) => {
                warn!(ticker, error = %e, "fast snapshot unavailable");
                FastQuote::default()
            }
        };

        let info = match self
            .get_text(QUOTE_URL, &[("symbols", ticker.to_string())])
            .await
            .and_then(|body| parse_quote(&body))
        {
            Ok(info) => Some(info),
            Err(e) => {
                debug!(ticker, error = %e, "quote info unavailable");
                None
            }
        };

        let snapshot = merge_snapshot(history, &fast, info.as_ref());
        info!(
            ticker,
            company = ?snapshot.company_name,
            price = ?snapshot.last_price,
            market_cap = ?snapshot.market_cap,
            volume = ?snapshot.volume,
            "snapshot resolved"
        );
        Ok(snapshot)
    }
}
