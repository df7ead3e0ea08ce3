//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("News retrieval failed: {0}")]
    News(String),

    #[error("Article extraction failed: {0}")]
    Extraction(String),

    #[error("LLM request failed: {0}")]
    Llm(String),

    /// A feature whose credentials are absent. Callers degrade to placeholder text.
    #[error("{0} not configured")]
    NotConfigured(String),

    #[error("Sentiment classifier failed: {0}")]
    Classifier(String),

    /// Text handed to the classifier is below the non-whitespace floor.
    #[error("Text too short for sentiment analysis: {len} non-whitespace chars (min {min})")]
    TextTooShort { len: usize, min: usize },

    #[error("Cannot aggregate sentiment over zero articles")]
    EmptySentimentInput,

    #[error("Cannot aggregate sentiment: confidence sum is zero")]
    ZeroConfidence,

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
