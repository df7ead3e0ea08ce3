//! Article extraction adapters. Implement ArticleExtractorPort.

pub mod html_extractor;

pub use html_extractor::HtmlArticleExtractor;
