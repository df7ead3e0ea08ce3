//! Sentiment classifier adapters. Implement SentimentClassifierPort.
//!
//! `HfClassifier` calls hosted FinBERT; `LexiconClassifier` is the offline fallback
//! used when no inference token is configured.

pub mod hf_classifier;
pub mod lexicon_classifier;

pub use hf_classifier::HfClassifier;
pub use lexicon_classifier::LexiconClassifier;

use crate::domain::{Classification, DomainError, SentimentLabel};
use serde::Deserialize;

/// One `{label, score}` pair from a classifier's probability output.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Highest-probability entry whose label is one of the three known classes.
pub fn top_label(scores: &[LabelScore]) -> Result<Classification, DomainError> {
    scores
        .iter()
        .filter_map(|s| SentimentLabel::parse(&s.label).map(|label| (label, s.score)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, score)| Classification { label, score })
        .ok_or_else(|| DomainError::Classifier("no known label in classifier output".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ls(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.into(),
            score,
        }
    }

    #[test]
    fn test_top_label_ignores_unknown_labels() {
        let c = top_label(&[ls("bogus", 0.99), ls("neutral", 0.6), ls("positive", 0.3)]).unwrap();
        assert_eq!(c.label, SentimentLabel::Neutral);
        assert_eq!(c.score, 0.6);
    }

    #[test]
    fn test_top_label_empty_is_error() {
        assert!(top_label(&[]).is_err());
    }
}
