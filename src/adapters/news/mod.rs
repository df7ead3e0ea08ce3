//! News source adapters. Implement NewsSourcePort.
//!
//! Google News search scraping is the primary strategy; Google News RSS and NewsAPI
//! are fallbacks. `FallbackNewsSource` chains them.

pub mod fallback;
pub mod google_rss;
pub mod google_search;
pub mod newsapi;

pub use fallback::FallbackNewsSource;
pub use google_rss::GoogleNewsRss;
pub use google_search::GoogleNewsSearch;
pub use newsapi::NewsApiSource;

/// Drop the trailing `" - Publisher"` suffix that aggregators append to titles.
pub fn clean_title(title: &str) -> String {
    match title.rsplit_once(" - ") {
        Some((head, _)) => head.trim().to_string(),
        None => title.trim().to_string(),
    }
}
