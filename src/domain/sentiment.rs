//! Sentiment business rules: per-article mapping and the aggregate score.
//!
//! Pure functions; the classifier itself lives behind `SentimentClassifierPort`.

use super::entities::{
    AggregateSentiment, Classification, SentimentBucket, SentimentLabel, SentimentResult,
};
use super::errors::DomainError;

/// Minimum number of non-whitespace characters a text needs before it may be classified.
pub const MIN_TEXT_CHARS: usize = 10;

/// Reject text below the non-whitespace floor.
pub fn validate_text(text: &str) -> Result<(), DomainError> {
    let len = text.chars().filter(|c| !c.is_whitespace()).count();
    if len < MIN_TEXT_CHARS {
        return Err(DomainError::TextTooShort {
            len,
            min: MIN_TEXT_CHARS,
        });
    }
    Ok(())
}

/// POSITIVE → +confidence, NEGATIVE → -confidence, NEUTRAL → 0.0.
pub fn signed_score(label: SentimentLabel, confidence: f64) -> f64 {
    match label {
        SentimentLabel::Positive => confidence,
        SentimentLabel::Negative => -confidence,
        SentimentLabel::Neutral => 0.0,
    }
}

impl SentimentResult {
    pub fn from_classification(c: Classification) -> Self {
        let confidence = c.score.clamp(0.0, 1.0);
        Self {
            label: c.label,
            confidence,
            signed_score: signed_score(c.label, confidence),
        }
    }
}

/// Bucket a 0..=100 score. Lower bounds are inclusive.
pub fn bucket_for(score: f64) -> SentimentBucket {
    if score >= 70.0 {
        SentimentBucket::Bullish
    } else if score >= 60.0 {
        SentimentBucket::SlightlyBullish
    } else if score >= 40.0 {
        SentimentBucket::Neutral
    } else if score >= 30.0 {
        SentimentBucket::SlightlyBearish
    } else {
        SentimentBucket::Bearish
    }
}

/// Combine per-article results into one score.
///
/// The score is the confidence-weighted mean of signed scores rescaled from [-1, 1]
/// to [0, 100]. The reported confidence is the plain (unweighted) mean of confidences.
pub fn aggregate(results: &[SentimentResult]) -> Result<AggregateSentiment, DomainError> {
    if results.is_empty() {
        return Err(DomainError::EmptySentimentInput);
    }

    let confidence_sum: f64 = results.iter().map(|r| r.confidence).sum();
    if confidence_sum <= 0.0 {
        return Err(DomainError::ZeroConfidence);
    }

    let weighted_sum: f64 = results.iter().map(|r| r.signed_score * r.confidence).sum();
    let weighted = weighted_sum / confidence_sum;
    let final_score = ((weighted + 1.0) / 2.0) * 100.0;

    let count = |label| results.iter().filter(|r| r.label == label).count();

    Ok(AggregateSentiment {
        final_score,
        sentiment_label: bucket_for(final_score),
        positive_count: count(SentimentLabel::Positive),
        negative_count: count(SentimentLabel::Negative),
        neutral_count: count(SentimentLabel::Neutral),
        total_articles: results.len(),
        confidence: confidence_sum / results.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: SentimentLabel, confidence: f64) -> SentimentResult {
        SentimentResult::from_classification(Classification {
            label,
            score: confidence,
        })
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_signed_score_mapping() {
        assert_eq!(signed_score(SentimentLabel::Positive, 0.8), 0.8);
        assert_eq!(signed_score(SentimentLabel::Negative, 0.8), -0.8);
        assert_eq!(signed_score(SentimentLabel::Neutral, 0.8), 0.0);
    }

    #[test]
    fn test_validate_text_rejects_short_input() {
        let err = validate_text("short").unwrap_err();
        assert!(matches!(err, DomainError::TextTooShort { len: 5, min: 10 }));
    }

    #[test]
    fn test_validate_text_ignores_whitespace() {
        assert!(validate_text("a b c d e f g h i").is_err());
        assert!(validate_text("  abcdefghij  ").is_ok());
    }

    #[test]
    fn test_all_positive_full_confidence_is_100() {
        let agg = aggregate(&[
            result(SentimentLabel::Positive, 1.0),
            result(SentimentLabel::Positive, 1.0),
        ])
        .unwrap();
        assert!(approx(agg.final_score, 100.0));
        assert_eq!(agg.sentiment_label, SentimentBucket::Bullish);
        assert_eq!(agg.positive_count, 2);
        assert_eq!(agg.total_articles, 2);
    }

    #[test]
    fn test_all_negative_full_confidence_is_0() {
        let agg = aggregate(&[
            result(SentimentLabel::Negative, 1.0),
            result(SentimentLabel::Negative, 1.0),
            result(SentimentLabel::Negative, 1.0),
        ])
        .unwrap();
        assert!(approx(agg.final_score, 0.0));
        assert_eq!(agg.sentiment_label, SentimentBucket::Bearish);
        assert_eq!(agg.negative_count, 3);
    }

    #[test]
    fn test_all_neutral_is_50_for_any_confidence() {
        for conf in [0.1, 0.55, 0.99] {
            let agg = aggregate(&[
                result(SentimentLabel::Neutral, conf),
                result(SentimentLabel::Neutral, 1.0 - conf / 2.0),
            ])
            .unwrap();
            assert!(approx(agg.final_score, 50.0));
            assert_eq!(agg.sentiment_label, SentimentBucket::Neutral);
            assert_eq!(agg.neutral_count, 2);
        }
    }

    #[test]
    fn test_bucket_lower_bounds_are_inclusive() {
        assert_eq!(bucket_for(70.0), SentimentBucket::Bullish);
        assert_eq!(bucket_for(69.9), SentimentBucket::SlightlyBullish);
        assert_eq!(bucket_for(60.0), SentimentBucket::SlightlyBullish);
        assert_eq!(bucket_for(59.99), SentimentBucket::Neutral);
        assert_eq!(bucket_for(40.0), SentimentBucket::Neutral);
        assert_eq!(bucket_for(30.0), SentimentBucket::SlightlyBearish);
        assert_eq!(bucket_for(29.9), SentimentBucket::Bearish);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(
            aggregate(&[]),
            Err(DomainError::EmptySentimentInput)
        ));
    }

    #[test]
    fn test_zero_confidence_sum_is_error() {
        let zero = result(SentimentLabel::Positive, 0.0);
        assert!(matches!(
            aggregate(&[zero, zero]),
            Err(DomainError::ZeroConfidence)
        ));
    }

    #[test]
    fn test_mixed_input_weighted_mean() {
        let agg = aggregate(&[
            result(SentimentLabel::Positive, 0.9),
            result(SentimentLabel::Positive, 0.9),
            result(SentimentLabel::Negative, 0.5),
        ])
        .unwrap();
        // Σ(signed·conf) / Σ(conf) with signed = ±conf
        let weighted = (0.9 * 0.9 + 0.9 * 0.9 - 0.5 * 0.5) / (0.9 + 0.9 + 0.5);
        assert!(approx(agg.final_score, (weighted + 1.0) / 2.0 * 100.0));
        assert_eq!(agg.sentiment_label, SentimentBucket::Bullish);
        assert_eq!(agg.positive_count, 2);
        assert_eq!(agg.negative_count, 1);
        assert!(approx(agg.confidence, (0.9 + 0.9 + 0.5) / 3.0));
    }

    #[test]
    fn test_unit_direction_scores_weighted_mean() {
        // Results carrying unit-direction signed scores weight each direction by confidence.
        let make = |label, signed_score, confidence| SentimentResult {
            label,
            confidence,
            signed_score,
        };
        let agg = aggregate(&[
            make(SentimentLabel::Positive, 1.0, 0.9),
            make(SentimentLabel::Positive, 1.0, 0.9),
            make(SentimentLabel::Negative, -1.0, 0.5),
        ])
        .unwrap();
        let weighted = (0.9 + 0.9 - 0.5) / (0.9 + 0.9 + 0.5);
        assert!(approx(agg.final_score, (weighted + 1.0) / 2.0 * 100.0));
    }

    #[test]
    fn test_confidence_is_unweighted_mean() {
        let agg = aggregate(&[
            result(SentimentLabel::Positive, 0.2),
            result(SentimentLabel::Neutral, 1.0),
        ])
        .unwrap();
        assert!(approx(agg.confidence, 0.6));
        // Weighted score differs from an unweighted one: (0.04 / 1.2 + 1) / 2 * 100
        assert!(approx(agg.final_score, (0.04 / 1.2 + 1.0) / 2.0 * 100.0));
    }

    #[test]
    fn test_score_and_confidence_stay_in_range() {
        let labels = [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ];
        for n in 1..=6usize {
            let results: Vec<SentimentResult> = (0..n)
                .map(|i| {
                    let conf = ((i * 37 + n * 11) % 100) as f64 / 100.0 + 0.01;
                    result(labels[(i + n) % 3], conf)
                })
                .collect();
            let agg = aggregate(&results).unwrap();
            assert!((0.0..=100.0).contains(&agg.final_score), "{}", agg.final_score);
            assert!((0.0..=1.0).contains(&agg.confidence), "{}", agg.confidence);
            assert_eq!(
                agg.positive_count + agg.negative_count + agg.neutral_count,
                agg.total_articles
            );
        }
    }

    #[test]
    fn test_classification_confidence_is_clamped() {
        let r = result(SentimentLabel::Negative, 1.2);
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.signed_score, -1.0);
    }
}
