use std::cmp::Ordering;

use tracing::instrument;

use common::{CategoryBreakdown, MonthlyEmissions, RankedCategory};

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::store::CarbonStore;

/// Ranks the categories of a month, biggest emitter first.
#[instrument(skip(store))]
pub async fn breakdown(
    store: &dyn CarbonStore,
    business_id: i32,
    month: u32,
    year: i32,
) -> Result<CategoryBreakdown> {
    let emissions = aggregate(store, business_id, month, year).await?;
    Ok(rank_categories(emissions))
}

pub fn rank_categories(emissions: MonthlyEmissions) -> CategoryBreakdown {
    let mut categories: Vec<RankedCategory> = emissions
        .by_category
        .into_iter()
        .map(|(name, totals)| RankedCategory {
            name,
            total: totals.total,
            count: totals.count,
            percentage: totals.percentage,
        })
        .collect();

    // ties keep the alphabetical order of the map
    categories.sort_by(|a, b| match b.total.cmp(&a.total) {
        Ordering::Equal => a.name.cmp(&b.name),
        other => other,
    });

    let insight = match categories.first() {
        Some(top) if !emissions.total_co2.is_zero() => format!(
            "{} is your biggest emission source at {}% of total emissions",
            top.name, top.percentage
        ),
        _ => "No emissions logged for this period".to_string(),
    };

    CategoryBreakdown {
        month: emissions.month,
        year: emissions.year,
        total_co2: emissions.total_co2,
        by_scope: emissions.by_scope,
        categories,
        insight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, new_business, new_category, new_log, setup_store};
    use model::entities::activity_category::Scope;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_sorted_with_insight() {
        let store = setup_store().await.unwrap();
        let db = store.connection();
        let business = new_business(db, "Restaurant").await.unwrap();
        let (gas, _) = new_category(db, "Natural Gas", "cubic metres", Scope::Direct, Decimal::new(204, 2))
            .await
            .unwrap();
        let (power, _) = new_category(db, "Electricity", "kWh", Scope::IndirectEnergy, Decimal::new(82, 2))
            .await
            .unwrap();
        let (waste, _) = new_category(db, "Waste Recycled", "kg", Scope::ValueChain, Decimal::new(2, 2))
            .await
            .unwrap();

        new_log(db, &business, &gas, Decimal::from(25), date(2026, 7, 1)).await.unwrap();
        new_log(db, &business, &power, Decimal::from(60), date(2026, 7, 2)).await.unwrap();
        new_log(db, &business, &waste, Decimal::from(15), date(2026, 7, 3)).await.unwrap();

        let result = breakdown(&store, business.id, 7, 2026).await.unwrap();

        let names: Vec<&str> = result.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Electricity", "Natural Gas", "Waste Recycled"]);
        assert_eq!(
            result.insight,
            "Electricity is your biggest emission source at 60.00% of total emissions"
        );
    }

    #[tokio::test]
    async fn test_empty_month() {
        let store = setup_store().await.unwrap();
        let business = new_business(store.connection(), "Restaurant").await.unwrap();

        let result = breakdown(&store, business.id, 7, 2026).await.unwrap();
        assert!(result.categories.is_empty());
        assert_eq!(result.insight, "No emissions logged for this period");
    }
}
