//! NewsAPI (`/v2/everything`) source. Enabled only when an API key is configured.

use crate::domain::{DomainError, NewsItem, NewsQuery};
use crate::ports::NewsSourcePort;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
/// Finance sites only, to keep results relevant.
const FINANCE_DOMAINS: &str =
    "reuters.com,bloomberg.com,cnbc.com,finance.yahoo.com,marketwatch.com";
const PAGE_SIZE: u32 = 10;

pub struct NewsApiSource {
    client: Client,
    api_key: String,
}

impl NewsApiSource {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// `"<company>" OR T stock OR T share OR T earnings`
    pub fn build_query(ticker: &str, company_name: Option<&str>) -> String {
        let base = format!("{t} stock OR {t} share OR {t} earnings", t = ticker);
        match company_name {
            Some(name) if !name.trim().is_empty() => format!("\"{}\" OR {}", name.trim(), base),
            _ => base,
        }
    }
}

#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    source: Option<ApiSource>,
}

#[derive(Deserialize)]
struct ApiSource {
    name: Option<String>,
}

#[async_trait::async_trait]
impl NewsSourcePort for NewsApiSource {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, DomainError> {
        let q = Self::build_query(&query.ticker, query.company_name.as_deref());
        let page_size = PAGE_SIZE.to_string();
        let mut params: Vec<(&str, String)> = vec![
            ("q", q),
            ("language", "en".to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", page_size),
            ("page", "1".to_string()),
            ("domains", FINANCE_DOMAINS.to_string()),
        ];
        if let Some(range) = &query.range {
            params.push(("from", range.start.to_string()));
            params.push(("to", range.end.to_string()));
        }

        let response = self
            .client
            .get(EVERYTHING_URL)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| DomainError::News(format!("newsapi request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "newsapi returned error");
            return Err(DomainError::News(format!(
                "newsapi error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::News(format!("newsapi body unreadable: {}", e)))?;
        let items = parse_response(&body)?;
        info!(ticker = %query.ticker, count = items.len(), "newsapi results");
        Ok(items)
    }
}

/// Parse an `/v2/everything` body. Articles missing title or URL are dropped.
pub fn parse_response(body: &str) -> Result<Vec<NewsItem>, DomainError> {
    let parsed: EverythingResponse = serde_json::from_str(body)
        .map_err(|e| DomainError::News(format!("failed to parse newsapi response: {}", e)))?;

    Ok(parsed
        .articles
        .into_iter()
        .filter_map(|a| {
            let title = a.title?;
            let url = a.url?;
            Some(NewsItem {
                title,
                url,
                published_at: a
                    .published_at
                    .as_deref()
                    .map(format_published)
                    .unwrap_or_default(),
                snippet: a.description,
                source: a.source.and_then(|s| s.name),
            })
        })
        .collect())
}

/// RFC 3339 → `%Y-%m-%d %H:%M`; unparsable input is kept verbatim.
pub fn format_published(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
