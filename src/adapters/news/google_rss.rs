//! Google News RSS search (fallback when search scraping yields nothing).

use super::clean_title;
use crate::domain::{DomainError, NewsItem, NewsQuery};
use crate::ports::NewsSourcePort;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

const RSS_SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Entries kept per feed.
pub const RSS_LIMIT: usize = 5;

pub struct GoogleNewsRss {
    client: Client,
}

impl GoogleNewsRss {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `https://news.google.com/rss/search?q=<terms>&hl=en-US&gl=US&ceid=US:en`
    pub fn feed_url(terms: &str) -> Result<Url, DomainError> {
        Url::parse_with_params(
            RSS_SEARCH_URL,
            &[("q", terms), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")],
        )
        .map_err(|e| DomainError::News(format!("bad rss url: {}", e)))
    }
}

#[async_trait::async_trait]
impl NewsSourcePort for GoogleNewsRss {
    fn name(&self) -> &str {
        "google-rss"
    }

    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, DomainError> {
        let url = Self::feed_url(&query.ticker)?;
        debug!(url = %url, "fetching google news rss");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::News(format!("rss request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::News(format!(
                "rss returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::News(format!("rss body unreadable: {}", e)))?;

        let items = parse_feed(&bytes, RSS_LIMIT)?;
        info!(ticker = %query.ticker, count = items.len(), "google rss parsed");
        Ok(items)
    }
}

/// Parse an RSS 2.0 document into at most `limit` items. Entries without a title
/// or link are skipped.
pub fn parse_feed(xml: &[u8], limit: usize) -> Result<Vec<NewsItem>, DomainError> {
    let channel = rss::Channel::read_from(xml)
        .map_err(|e| DomainError::News(format!("failed to parse rss: {}", e)))?;

    Ok(channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?;
            let link = item.link()?;
            Some(NewsItem {
                title: clean_title(title),
                url: link.to_string(),
                published_at: item.pub_date().unwrap_or_default().to_string(),
                snippet: None,
                source: item.source().and_then(|s| s.title()).map(str::to_string),
            })
        })
        .take(limit)
        .collect())
}
