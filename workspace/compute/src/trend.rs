use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use common::{MonthlyEmissions, TrendDirection, TrendPoint, TrendReport, TrendSummary};

use crate::aggregate::{aggregate_period, ensure_business_exists};
use crate::error::{CarbonError, Result};
use crate::period::MonthPeriod;
use crate::rounding::{round_mass, round_percent};

use crate::store::CarbonStore;

/// Upper bound on the number of months in a trend; larger requests are clamped.
pub const MAX_TREND_MONTHS: u32 = 12;

/// Builds a trend over `months_back` consecutive months ending with the
/// month containing `today`, oldest first.
#[instrument(skip(store))]
pub async fn trend(
    store: &dyn CarbonStore,
    business_id: i32,
    months_back: u32,
    today: NaiveDate,
) -> Result<TrendReport> {
    if months_back == 0 {
        return Err(CarbonError::invalid("months", "must be at least 1"));
    }
    let months_back = months_back.min(MAX_TREND_MONTHS);

    ensure_business_exists(store, business_id).await?;

    let periods = MonthPeriod::containing(today)?.window_ending_here(months_back)?;
    let mut months = Vec::with_capacity(periods.len());
    for period in &periods {
        let emissions = aggregate_period(store, business_id, period).await?;
        months.push((period.label(), emissions));
    }

    let report = build_trend(months);
    info!(
        "Built {}-month trend for business {}: {}",
        months_back, business_id, report.summary.overall_direction
    );
    Ok(report)
}

/// Computes month-over-month deltas and the summary of already aggregated months.
pub fn build_trend(months: Vec<(String, MonthlyEmissions)>) -> TrendReport {
    let first_total = months.first().map(|(_, m)| m.total_co2);
    let last_total = months.last().map(|(_, m)| m.total_co2);
    let total_in_period: Decimal = months.iter().map(|(_, m)| m.total_co2).sum();
    let count = months.len() as u32;

    let mut previous: Option<Decimal> = None;
    let trend = months
        .into_iter()
        .map(|(label, emissions)| {
            let (change, direction) = match previous {
                None => (None, None),
                Some(prev) => month_over_month(prev, emissions.total_co2),
            };
            previous = Some(emissions.total_co2);
            TrendPoint {
                emissions,
                label,
                change_from_previous_month: change,
                direction,
            }
        })
        .collect();

    let (overall_change_percent, overall_direction) = match (first_total, last_total) {
        (Some(first), Some(last)) if !first.is_zero() => {
            let change = percent_change(first, last);
            let direction = if change > Decimal::ZERO {
                "Emissions increased"
            } else if change < Decimal::ZERO {
                "Emissions decreased"
            } else {
                "Emissions unchanged"
            };
            (Some(change), direction.to_string())
        }
        _ => (None, "Insufficient data".to_string()),
    };

    TrendReport {
        trend,
        summary: TrendSummary {
            months: count,
            overall_change_percent,
            overall_direction,
            total_co2_in_period: round_mass(total_in_period),
        },
    }
}

fn month_over_month(
    previous: Decimal,
    current: Decimal,
) -> (Option<Decimal>, Option<TrendDirection>) {
    if previous.is_zero() {
        return (None, Some(TrendDirection::NoPreviousData));
    }

    let change = percent_change(previous, current);
    let direction = if change.is_zero() {
        TrendDirection::Unchanged
    } else if change > Decimal::ZERO {
        TrendDirection::Increased
    } else {
        TrendDirection::Decreased
    };
    (Some(change), Some(direction))
}

fn percent_change(from: Decimal, to: Decimal) -> Decimal {
    round_percent((to - from) / from * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, new_business, new_category, new_log, setup_store};
    use model::entities::activity_category::Scope;

    #[tokio::test]
    async fn test_increase_then_drop_to_zero() {
        let store = setup_store().await.unwrap();
        let db = store.connection();
        let business = new_business(db, "Office").await.unwrap();
        let (diesel, _) = new_category(db, "Diesel", "litres", Scope::Direct, Decimal::new(268, 2))
            .await
            .unwrap();

        new_log(db, &business, &diesel, Decimal::from(100), date(2026, 1, 10)).await.unwrap();
        new_log(db, &business, &diesel, Decimal::from(150), date(2026, 2, 10)).await.unwrap();

        let report = trend(&store, business.id, 3, date(2026, 3, 16)).await.unwrap();

        assert_eq!(report.trend.len(), 3);
        let labels: Vec<&str> = report.trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["January 2026", "February 2026", "March 2026"]);

        assert_eq!(report.trend[0].change_from_previous_month, None);
        assert_eq!(report.trend[0].direction, None);

        assert_eq!(
            report.trend[1].change_from_previous_month.map(|c| c.to_string()),
            Some("50.00".to_string())
        );
        assert_eq!(report.trend[1].direction, Some(TrendDirection::Increased));

        assert_eq!(
            report.trend[2].change_from_previous_month.map(|c| c.to_string()),
            Some("-100.00".to_string())
        );
        assert_eq!(report.trend[2].direction, Some(TrendDirection::Decreased));

        assert_eq!(report.summary.months, 3);
        assert_eq!(report.summary.total_co2_in_period.to_string(), "250.0000");
        assert_eq!(
            report.summary.overall_change_percent.map(|c| c.to_string()),
            Some("-100.00".to_string())
        );
        assert_eq!(report.summary.overall_direction, "Emissions decreased");
    }

    #[tokio::test]
    async fn test_zero_previous_month_has_no_ratio() {
        let store = setup_store().await.unwrap();
        let db = store.connection();
        let business = new_business(db, "Office").await.unwrap();
        let (coal, _) = new_category(db, "Coal", "kg", Scope::Direct, Decimal::new(242, 2))
            .await
            .unwrap();

        new_log(db, &business, &coal, Decimal::from(80), date(2026, 2, 3)).await.unwrap();

        let report = trend(&store, business.id, 2, date(2026, 2, 20)).await.unwrap();

        assert_eq!(report.trend[1].change_from_previous_month, None);
        assert_eq!(report.trend[1].direction, Some(TrendDirection::NoPreviousData));
        assert_eq!(report.summary.overall_change_percent, None);
        assert_eq!(report.summary.overall_direction, "Insufficient data");
    }

    #[tokio::test]
    async fn test_window_crosses_year_and_is_clamped() {
        let store = setup_store().await.unwrap();
        let business = new_business(store.connection(), "Office").await.unwrap();

        let report = trend(&store, business.id, 40, date(2026, 1, 5)).await.unwrap();

        assert_eq!(report.trend.len(), MAX_TREND_MONTHS as usize);
        let first = &report.trend[0].emissions;
        assert_eq!((first.year, first.month), (2025, 2));
        let last = &report.trend[11].emissions;
        assert_eq!((last.year, last.month), (2026, 1));
    }

    #[tokio::test]
    async fn test_zero_months_is_invalid() {
        let store = setup_store().await.unwrap();
        let business = new_business(store.connection(), "Office").await.unwrap();

        let err = trend(&store, business.id, 0, date(2026, 1, 5)).await.unwrap_err();
        assert!(matches!(err, CarbonError::InvalidInput { field: "months", .. }));
    }

    #[test]
    fn test_equal_months_are_unchanged() {
        let month = |m: u32| MonthlyEmissions {
            month: m,
            year: 2026,
            total_co2: Decimal::from(42),
            by_scope: Default::default(),
            by_category: Default::default(),
            log_count: 1,
        };

        let report = build_trend(vec![
            ("April 2026".to_string(), month(4)),
            ("May 2026".to_string(), month(5)),
        ]);

        assert_eq!(report.trend[1].direction, Some(TrendDirection::Unchanged));
        assert_eq!(report.trend[1].change_from_previous_month, Some(Decimal::ZERO));
        assert_eq!(report.summary.overall_direction, "Emissions unchanged");
    }
}
