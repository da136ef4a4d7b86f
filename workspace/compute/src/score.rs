//! Carbon intensity score against the industry benchmark.

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use common::{BenchmarkComparison, IntensityScore, PerformanceLabel, ScoreRecord};

use crate::aggregate::{aggregate_period, ensure_business_exists};
use crate::error::{CarbonError, Result};
use crate::period::MonthPeriod;
use crate::rounding::{percentage_of, round_mass, round_percent};
use crate::store::CarbonStore;

/// Number of cached scores returned by [`benchmark_comparison`].
pub const SCORE_HISTORY_LEN: u64 = 6;

/// `clamp(100 - total / benchmark * 50, 0, 100)` with two decimals.
///
/// The benchmark must be positive.
pub fn intensity(total: Decimal, benchmark: Decimal) -> Decimal {
    let raw = Decimal::ONE_HUNDRED - total / benchmark * Decimal::from(50);
    round_percent(raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
}

/// Pure scoring of a period total against a benchmark.
pub fn evaluate(
    period: &MonthPeriod,
    industry: &str,
    total: Decimal,
    benchmark: Decimal,
) -> Result<IntensityScore> {
    if benchmark <= Decimal::ZERO {
        return Err(CarbonError::Configuration(format!(
            "benchmark for industry '{}' must be positive, got {}",
            industry, benchmark
        )));
    }

    let (score, percentage, interpretation) = if total.is_zero() {
        (
            round_percent(Decimal::ONE_HUNDRED),
            round_percent(Decimal::ZERO),
            "No emissions logged for this period".to_string(),
        )
    } else {
        let percentage = percentage_of(total, benchmark);
        (
            intensity(total, benchmark),
            percentage,
            interpret(industry, total, benchmark, percentage),
        )
    };

    Ok(IntensityScore {
        month: period.month(),
        year: period.year(),
        industry: industry.to_string(),
        performance_label: PerformanceLabel::for_score(score),
        score,
        total_co2: round_mass(total),
        benchmark_co2: round_mass(benchmark),
        percentage_vs_benchmark: percentage,
        difference: round_mass(total - benchmark),
        interpretation,
    })
}

fn interpret(industry: &str, total: Decimal, benchmark: Decimal, percentage: Decimal) -> String {
    if total < benchmark {
        format!(
            "Your emissions are {}% of the {} average, below the industry benchmark",
            percentage, industry
        )
    } else if total > benchmark {
        format!(
            "Your emissions are {}% of the {} average, above the industry benchmark",
            percentage, industry
        )
    } else {
        format!("Your emissions match the {} average", industry)
    }
}

/// Scores a business for one month and caches the result.
#[instrument(skip(store))]
pub async fn score(
    store: &dyn CarbonStore,
    business_id: i32,
    month: u32,
    year: i32,
) -> Result<IntensityScore> {
    let period = MonthPeriod::new(year, month)?;
    let business = ensure_business_exists(store, business_id).await?;

    let benchmark = store
        .find_benchmark_by_industry(&business.industry)
        .await?
        .ok_or_else(|| {
            error!("No benchmark configured for industry {}", business.industry);
            CarbonError::Configuration(format!(
                "no benchmark configured for industry '{}'",
                business.industry
            ))
        })?;

    let emissions = aggregate_period(store, business_id, &period).await?;
    let result = evaluate(
        &period,
        &business.industry,
        emissions.total_co2,
        benchmark.avg_monthly_emissions,
    )?;

    store
        .upsert_score(business_id, month as i32, year, result.score)
        .await?;

    info!(
        "Business {} scored {} ({}) for {}",
        business_id,
        result.score,
        result.performance_label.as_str(),
        period.label()
    );
    Ok(result)
}

/// The current score plus the most recent cached scores, newest first.
#[instrument(skip(store))]
pub async fn benchmark_comparison(
    store: &dyn CarbonStore,
    business_id: i32,
    month: u32,
    year: i32,
) -> Result<BenchmarkComparison> {
    let current = score(store, business_id, month, year).await?;

    let score_history: Vec<ScoreRecord> = store
        .recent_scores(business_id, SCORE_HISTORY_LEN)
        .await?
        .into_iter()
        .map(|row| ScoreRecord {
            month: row.month as u32,
            year: row.year,
            score: row.score,
            computed_at: row.computed_at,
        })
        .collect();

    debug!("Loaded {} historical scores", score_history.len());
    Ok(BenchmarkComparison {
        current,
        score_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, new_benchmark, new_business, new_category, new_log, setup_store};
    use model::entities::activity_category::Scope;
    use model::entities::carbon_intensity_score;
    use model::entities::prelude::CarbonIntensityScore;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    #[test]
    fn test_score_boundaries() {
        let benchmark = Decimal::from(1000);
        assert_eq!(intensity(Decimal::ZERO, benchmark), Decimal::from(100));
        assert_eq!(intensity(Decimal::from(1000), benchmark), Decimal::from(50));
        assert_eq!(intensity(Decimal::from(2000), benchmark), Decimal::ZERO);
        assert_eq!(intensity(Decimal::from(3000), benchmark), Decimal::ZERO);
        assert_eq!(intensity(Decimal::from(3000), benchmark).to_string(), "0.00");
    }

    #[test]
    fn test_zero_total_scores_full_marks() {
        let period = MonthPeriod::new(2026, 3).unwrap();
        let result = evaluate(&period, "Office", Decimal::ZERO, Decimal::from(980)).unwrap();

        assert_eq!(result.score.to_string(), "100.00");
        assert_eq!(result.performance_label, PerformanceLabel::Excellent);
        assert_eq!(result.percentage_vs_benchmark.to_string(), "0.00");
        assert_eq!(result.difference, Decimal::from(-980));
        assert_eq!(result.interpretation, "No emissions logged for this period");
    }

    #[test]
    fn test_non_positive_benchmark_is_configuration_error() {
        let period = MonthPeriod::new(2026, 3).unwrap();
        let err = evaluate(&period, "Office", Decimal::ONE, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, CarbonError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_march_example_is_excellent() {
        let store = setup_store().await.unwrap();
        let db = store.connection();
        new_benchmark(db, "Office", Decimal::from(1000)).await.unwrap();
        let business = new_business(db, "Office").await.unwrap();
        let (diesel, _) = new_category(db, "Diesel", "litres", Scope::Direct, Decimal::new(268, 2))
            .await
            .unwrap();
        let (flights, _) = new_category(db, "Business Air Travel", "km", Scope::ValueChain, Decimal::new(255, 3))
            .await
            .unwrap();
        new_log(db, &business, &diesel, Decimal::from(50), date(2026, 3, 4)).await.unwrap();
        new_log(db, &business, &flights, Decimal::from(150), date(2026, 3, 9)).await.unwrap();

        let result = score(&store, business.id, 3, 2026).await.unwrap();

        assert_eq!(result.score.to_string(), "90.00");
        assert_eq!(result.performance_label, PerformanceLabel::Excellent);
        assert_eq!(result.total_co2, Decimal::from(200));
        assert_eq!(result.benchmark_co2, Decimal::from(1000));
        assert_eq!(result.percentage_vs_benchmark.to_string(), "20.00");
        assert_eq!(result.difference, Decimal::from(-800));
    }

    #[tokio::test]
    async fn test_rescoring_overwrites_single_row() {
        let store = setup_store().await.unwrap();
        let db = store.connection();
        new_benchmark(db, "Retail Store", Decimal::from(1920)).await.unwrap();
        let business = new_business(db, "Retail Store").await.unwrap();
        let (power, _) = new_category(db, "Electricity", "kWh", Scope::IndirectEnergy, Decimal::new(82, 2))
            .await
            .unwrap();

        let first = score(&store, business.id, 4, 2026).await.unwrap();
        let again = score(&store, business.id, 4, 2026).await.unwrap();
        assert_eq!(first.score, again.score);

        new_log(db, &business, &power, Decimal::from(1920), date(2026, 4, 2)).await.unwrap();
        let latest = score(&store, business.id, 4, 2026).await.unwrap();
        assert_eq!(latest.score, Decimal::from(50));

        let rows = CarbonIntensityScore::find()
            .filter(carbon_intensity_score::Column::BusinessId.eq(business.id))
            .all(db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_missing_benchmark_is_configuration_error() {
        let store = setup_store().await.unwrap();
        let business = new_business(store.connection(), "Space Tourism").await.unwrap();

        let err = score(&store, business.id, 1, 2026).await.unwrap_err();
        assert!(matches!(err, CarbonError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unknown_business_is_not_found() {
        let store = setup_store().await.unwrap();
        let err = score(&store, 77, 1, 2026).await.unwrap_err();
        assert!(matches!(err, CarbonError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_benchmark_comparison_history_is_newest_first() {
        let store = setup_store().await.unwrap();
        let db = store.connection();
        new_benchmark(db, "Hotel", Decimal::from(4100)).await.unwrap();
        let business = new_business(db, "Hotel").await.unwrap();

        for (month, year) in [(11, 2025), (12, 2025), (1, 2026), (2, 2026), (3, 2026), (4, 2026), (5, 2026)] {
            score(&store, business.id, month, year).await.unwrap();
        }

        let comparison = benchmark_comparison(&store, business.id, 6, 2026).await.unwrap();

        assert_eq!(comparison.current.month, 6);
        assert_eq!(comparison.score_history.len(), SCORE_HISTORY_LEN as usize);
        let periods: Vec<(i32, u32)> = comparison
            .score_history
            .iter()
            .map(|s| (s.year, s.month))
            .collect();
        assert_eq!(
            periods,
            vec![(2026, 6), (2026, 5), (2026, 4), (2026, 3), (2026, 2), (2026, 1)]
        );
    }
}
