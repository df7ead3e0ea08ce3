//! Offline keyword classifier with financial lexicons.
//!
//! Used when no hosted classifier is configured, so a run still produces a gauge.
//! Coarser than FinBERT; reports a probability-like confidence in [0.5, 1].

use crate::domain::{Classification, DomainError, SentimentLabel};
use crate::ports::SentimentClassifierPort;

const BULLISH_TERMS: &[(&str, f64)] = &[
    ("beat", 0.6),
    ("beats", 0.6),
    ("surge", 0.8),
    ("surges", 0.8),
    ("soar", 0.9),
    ("soars", 0.9),
    ("rally", 0.7),
    ("rallies", 0.7),
    ("record", 0.5),
    ("growth", 0.4),
    ("grew", 0.4),
    ("gain", 0.5),
    ("gains", 0.5),
    ("upgrade", 0.7),
    ("upgraded", 0.7),
    ("outperform", 0.7),
    ("bullish", 0.8),
    ("profit", 0.4),
    ("strong", 0.4),
    ("raises", 0.5),
    ("buyback", 0.4),
    ("dividend", 0.3),
    ("breakthrough", 0.7),
    ("exceeds", 0.6),
    ("optimistic", 0.6),
];

const BEARISH_TERMS: &[(&str, f64)] = &[
    ("miss", 0.6),
    ("misses", 0.6),
    ("plunge", 0.9),
    ("plunges", 0.9),
    ("slump", 0.8),
    ("slumps", 0.8),
    ("crash", 0.9),
    ("decline", 0.5),
    ("declines", 0.5),
    ("fell", 0.5),
    ("falls", 0.5),
    ("loss", 0.5),
    ("losses", 0.5),
    ("downgrade", 0.7),
    ("downgraded", 0.7),
    ("underperform", 0.7),
    ("bearish", 0.8),
    ("lawsuit", 0.6),
    ("probe", 0.5),
    ("recall", 0.5),
    ("layoffs", 0.6),
    ("weak", 0.4),
    ("cuts", 0.4),
    ("warning", 0.5),
    ("fraud", 0.9),
];

/// Net polarity below this magnitude is reported as neutral.
const NEUTRAL_BAND: f64 = 0.15;

#[derive(Debug, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous scoring, shared by the port impl and tests.
    pub fn score(text: &str) -> Classification {
        let mut bullish = 0.0;
        let mut bearish = 0.0;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if let Some((_, w)) = BULLISH_TERMS.iter().find(|(t, _)| *t == word) {
                bullish += w;
            }
            if let Some((_, w)) = BEARISH_TERMS.iter().find(|(t, _)| *t == word) {
                bearish += w;
            }
        }

        let total = bullish + bearish;
        // Polarity in [-1, 1]; the +1 damps texts with a single weak hit.
        let polarity = (bullish - bearish) / (total + 1.0);

        if polarity.abs() < NEUTRAL_BAND {
            Classification {
                label: SentimentLabel::Neutral,
                score: 1.0 - polarity.abs(),
            }
        } else {
            Classification {
                label: if polarity > 0.0 {
                    SentimentLabel::Positive
                } else {
                    SentimentLabel::Negative
                },
                score: 0.5 + polarity.abs() / 2.0,
            }
        }
    }
}

#[async_trait::async_trait]
impl SentimentClassifierPort for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, DomainError> {
        Ok(Self::score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullish_text() {
        let c = LexiconClassifier::score("Apple beats estimates as shares surge to a record");
        assert_eq!(c.label, SentimentLabel::Positive);
        assert!(c.score > 0.5 && c.score <= 1.0);
    }

    #[test]
    fn test_bearish_text() {
        let c = LexiconClassifier::score("Shares plunge after the company misses guidance; analysts downgrade");
        assert_eq!(c.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_neutral_text() {
        let c = LexiconClassifier::score("The company will hold its annual meeting on Tuesday.");
        assert_eq!(c.label, SentimentLabel::Neutral);
        assert_eq!(c.score, 1.0);
    }

    #[tokio::test]
    async fn test_port_impl() {
        let c = LexiconClassifier::new()
            .classify("Bullish analysts upgrade the stock")
            .await
            .unwrap();
        assert_eq!(c.label, SentimentLabel::Positive);
    }
}
