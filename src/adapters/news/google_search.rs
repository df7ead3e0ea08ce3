//! Google News search-page scraper (primary news source).
//!
//! Google changes its markup often, so container and field selectors are tried in
//! order and the first one that yields results wins.

use super::clean_title;
use crate::domain::{DomainError, NewsItem, NewsQuery};
use crate::ports::NewsSourcePort;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

const SEARCH_URL: &str = "https://www.google.com/search";
const GOOGLE_BASE: &str = "https://www.google.com";

/// Result containers, most specific first.
const CONTAINER_SELECTORS: &[&str] = &["div.SoaBEf", "div[data-ved]", "div.g"];
const TITLE_SELECTORS: &[&str] = &["div.MBeuO", "h3", "div[role='heading']", "a h3"];
const SNIPPET_SELECTORS: &[&str] = &[".GI74Re", ".s3v9rd", "span"];
const DATE_SELECTORS: &[&str] = &[".LfVVr", ".LEwnzc", ".f"];
const SOURCE_SELECTORS: &[&str] = &[".NUnG9d span", ".CEMjEf", ".WfABme"];

/// Items kept per search.
pub const SEARCH_LIMIT: usize = 5;

pub struct GoogleNewsSearch {
    client: Client,
}

impl GoogleNewsSearch {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `https://www.google.com/search?q=<terms> stock&gl=us&tbm=nws&num=100`
    pub fn search_url(terms: &str) -> Result<Url, DomainError> {
        let q = format!("{} stock", terms);
        Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", q.as_str()),
                ("gl", "us"),
                ("tbm", "nws"),
                ("num", "100"),
            ],
        )
        .map_err(|e| DomainError::News(format!("bad search url: {}", e)))
    }
}

#[async_trait::async_trait]
impl NewsSourcePort for GoogleNewsSearch {
    fn name(&self) -> &str {
        "google-search"
    }

    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, DomainError> {
        let url = Self::search_url(&query.ticker)?;
        debug!(url = %url, "fetching google news search page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::News(format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "google search returned error status");
            return Err(DomainError::News(format!("search returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::News(format!("search body unreadable: {}", e)))?;

        let items = parse_search_results(&body, SEARCH_LIMIT);
        info!(ticker = %query.ticker, count = items.len(), "google search scraped");
        Ok(items)
    }
}

/// Parse a news search result page. Returns at most `limit` items.
pub fn parse_search_results(html: &str, limit: usize) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let Some(link_sel) = selector("a") else {
        return Vec::new();
    };

    for container in CONTAINER_SELECTORS {
        let Some(container_sel) = selector(container) else {
            continue;
        };

        let mut results = Vec::new();
        for el in document.select(&container_sel).take(limit) {
            let Some(href) = el
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                continue;
            };
            let Some(title) = first_text(&el, TITLE_SELECTORS) else {
                continue;
            };

            results.push(NewsItem {
                title: clean_title(&title),
                url: resolve_link(href),
                published_at: first_text(&el, DATE_SELECTORS).unwrap_or_default(),
                snippet: first_text(&el, SNIPPET_SELECTORS),
                source: first_text(&el, SOURCE_SELECTORS),
            });
        }

        if !results.is_empty() {
            debug!(selector = container, count = results.len(), "search selector matched");
            return results;
        }
    }

    Vec::new()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Text of the first element matching any selector (in order). Whitespace-normalized.
fn first_text(el: &ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        let sel = selector(css)?;
        let found = el.select(&sel).next()?;
        let text = found
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");
        (!text.is_empty()).then_some(text)
    })
}

/// Absolute URL for a result link. Unwraps `/url?q=<target>` redirects.
fn resolve_link(href: &str) -> String {
    let Ok(base) = Url::parse(GOOGLE_BASE) else {
        return href.to_string();
    };
    let Ok(resolved) = base.join(href) else {
        return href.to_string();
    };
    if resolved.host_str() == Some("www.google.com") && resolved.path() == "/url" {
        if let Some((_, target)) = resolved
            .query_pairs()
            .find(|(k, _)| k == "q" || k == "url")
        {
            return target.into_owned();
        }
    }
    resolved.to_string()
}
