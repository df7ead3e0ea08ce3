//! Ordered chain of news sources: first non-empty result wins.

use crate::domain::{DomainError, NewsItem, NewsQuery};
use crate::ports::NewsSourcePort;
use std::sync::Arc;
use tracing::{info, warn};

pub struct FallbackNewsSource {
    sources: Vec<Arc<dyn NewsSourcePort>>,
}

impl FallbackNewsSource {
    pub fn new(sources: Vec<Arc<dyn NewsSourcePort>>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl NewsSourcePort for FallbackNewsSource {
    fn name(&self) -> &str {
        "fallback"
    }

    /// Tries each source in order. Errors are logged and treated as "nothing found";
    /// only when every source failed is the last error returned.
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, DomainError> {
        let mut last_error = None;
        let mut any_succeeded = false;

        for source in &self.sources {
            match source.search(query).await {
                Ok(items) if !items.is_empty() => {
                    info!(source = source.name(), count = items.len(), "news found");
                    return Ok(items);
                }
                Ok(_) => {
                    any_succeeded = true;
                    info!(source = source.name(), "no news, trying next source");
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "news source failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !any_succeeded => Err(e),
            _ => Ok(Vec::new()),
        }
    }
}
