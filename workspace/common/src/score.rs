use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Qualitative band of an intensity score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum PerformanceLabel {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Critical")]
    Critical,
}

impl PerformanceLabel {
    /// Bands are inclusive on their lower bound: 75, 50, 25.
    pub fn for_score(score: Decimal) -> Self {
        if score >= Decimal::from(75) {
            PerformanceLabel::Excellent
        } else if score >= Decimal::from(50) {
            PerformanceLabel::Good
        } else if score >= Decimal::from(25) {
            PerformanceLabel::NeedsImprovement
        } else {
            PerformanceLabel::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceLabel::Excellent => "Excellent",
            PerformanceLabel::Good => "Good",
            PerformanceLabel::NeedsImprovement => "Needs Improvement",
            PerformanceLabel::Critical => "Critical",
        }
    }
}

/// Carbon intensity of a business for one month relative to its industry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IntensityScore {
    pub month: u32,
    pub year: i32,
    pub industry: String,
    /// 0 to 100; 50 means emitting exactly the industry average.
    pub score: Decimal,
    pub performance_label: PerformanceLabel,
    pub total_co2: Decimal,
    pub benchmark_co2: Decimal,
    pub percentage_vs_benchmark: Decimal,
    /// Positive when above the benchmark.
    pub difference: Decimal,
    pub interpretation: String,
}

/// A cached score row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScoreRecord {
    pub month: u32,
    pub year: i32,
    pub score: Decimal,
    pub computed_at: NaiveDateTime,
}

/// The current score together with the most recent cached scores.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BenchmarkComparison {
    pub current: IntensityScore,
    /// Newest first.
    pub score_history: Vec<ScoreRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_bands_are_inclusive_on_lower_bound() {
        assert_eq!(PerformanceLabel::for_score(Decimal::from(100)), PerformanceLabel::Excellent);
        assert_eq!(PerformanceLabel::for_score(Decimal::from(75)), PerformanceLabel::Excellent);
        assert_eq!(PerformanceLabel::for_score(Decimal::new(7499, 2)), PerformanceLabel::Good);
        assert_eq!(PerformanceLabel::for_score(Decimal::from(50)), PerformanceLabel::Good);
        assert_eq!(
            PerformanceLabel::for_score(Decimal::new(4999, 2)),
            PerformanceLabel::NeedsImprovement
        );
        assert_eq!(
            PerformanceLabel::for_score(Decimal::from(25)),
            PerformanceLabel::NeedsImprovement
        );
        assert_eq!(PerformanceLabel::for_score(Decimal::new(2499, 2)), PerformanceLabel::Critical);
        assert_eq!(PerformanceLabel::for_score(Decimal::ZERO), PerformanceLabel::Critical);
    }

    #[test]
    fn test_label_serializes_with_spaces() {
        let json = serde_json::to_value(PerformanceLabel::NeedsImprovement).unwrap();
        assert_eq!(json, "Needs Improvement");
        assert_eq!(PerformanceLabel::NeedsImprovement.as_str(), "Needs Improvement");
    }
}
