//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod sentiment;

pub use entities::{
    AggregateSentiment, AiAnalysis, AnalysisOutcome, Classification, Condensation,
    CondensedArticle, DateRange, ExtractedArticle, MarketSnapshot, NewsItem, NewsQuery, PriceBar,
    SentimentBucket, SentimentLabel, SentimentResult, TickerReport,
};
pub use errors::DomainError;
