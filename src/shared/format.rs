//! Display formatting shared by the terminal and HTML dashboards.

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Placeholder for a missing metric.
pub const NOT_AVAILABLE: &str = "N/A";

/// Insert `,` every three digits of a non-negative integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,234.56`.
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| p.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if price < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// `2.95T`, `812.40B`, `35.10M`; smaller values with thousands separators.
pub fn format_market_cap(cap: Option<f64>) -> String {
    match cap.filter(|c| c.is_finite() && *c >= 0.0) {
        None => NOT_AVAILABLE.to_string(),
        Some(c) if c >= 1e12 => format!("{:.2}T", c / 1e12),
        Some(c) if c >= 1e9 => format!("{:.2}B", c / 1e9),
        Some(c) if c >= 1e6 => format!("{:.2}M", c / 1e6),
        Some(c) => group_thousands(&format!("{:.0}", c)),
    }
}

/// `62,501,000`.
pub fn format_volume(volume: Option<u64>) -> String {
    match volume {
        Some(v) => group_thousands(&v.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Aggregate score as shown on the gauge: one decimal.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Analysis confidence as shown: three decimals.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.3}", confidence)
}

/// Unicode block sparkline of a series, one character per value.
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;
    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK_CHARS[SPARK_CHARS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARK_CHARS.len() - 1) as f64).round() as usize;
                SPARK_CHARS[idx.min(SPARK_CHARS.len() - 1)]
            }
        })
        .collect()
}

/// Colour band of the analysis confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Confidence in [0, 1]: ≥ 0.8 high, ≥ 0.6 medium.
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "#4CAF50",
            Self::Medium => "#FF9800",
            Self::Low => "#F44336",
        }
    }
}

/// `#RRGGBB` to an RGB triple. Falls back to white on malformed input.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| {
        h.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0xff)
    };
    (channel(0), channel(2), channel(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(1234.5)), "$1,234.50");
        assert_eq!(format_price(Some(209.271)), "$209.27");
        assert_eq!(format_price(Some(1_000_000.0)), "$1,000,000.00");
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(Some(2.95e12)), "2.95T");
        assert_eq!(format_market_cap(Some(812.4e9)), "812.40B");
        assert_eq!(format_market_cap(Some(35.1e6)), "35.10M");
        assert_eq!(format_market_cap(Some(950_000.0)), "950,000");
        assert_eq!(format_market_cap(None), "N/A");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(Some(62_501_000)), "62,501,000");
        assert_eq!(format_volume(Some(999)), "999");
        assert_eq!(format_volume(None), "N/A");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::of(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::of(0.6), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::of(0.59), ConfidenceTier::Low);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#4CAF50"), (0x4c, 0xaf, 0x50));
        assert_eq!(hex_to_rgb("#zz"), (0xff, 0xff, 0xff));
    }

    #[test]
    fn test_display_rounding() {
        assert_eq!(format_score(75.04), "75.0");
        assert_eq!(format_score(100.0), "100.0");
        assert_eq!(format_confidence(0.8504), "0.850");
        assert_eq!(format_confidence(0.5), "0.500");
    }
}
