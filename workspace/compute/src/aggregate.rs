//! Monthly reduction of activity logs into scope and category totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use common::{CategoryTotal, MonthlyEmissions, ScopeTotals};
use model::entities::activity_category::Scope;

use crate::error::{CarbonError, Result};
use crate::period::MonthPeriod;
use crate::rounding::{percentage_of, round_mass};
use crate::store::{CarbonStore, LogRecord};

/// Reduces the logs of one period. Sums are exact; rounding happens once here.
pub fn summarize(period: &MonthPeriod, logs: &[LogRecord]) -> MonthlyEmissions {
    let mut scopes = ScopeTotals::default();
    let mut categories: BTreeMap<String, (Decimal, u64)> = BTreeMap::new();

    for record in logs {
        let amount = record.log.co2_amount;
        match record.log.scope {
            Scope::Direct => scopes.scope1 += amount,
            Scope::IndirectEnergy => scopes.scope2 += amount,
            Scope::ValueChain => scopes.scope3 += amount,
        }

        let entry = categories
            .entry(record.category_name.clone())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let total = scopes.total();
    let by_category = categories
        .into_iter()
        .map(|(name, (sum, count))| {
            (
                name,
                CategoryTotal {
                    total: round_mass(sum),
                    count,
                    percentage: percentage_of(sum, total),
                },
            )
        })
        .collect();

    MonthlyEmissions {
        month: period.month(),
        year: period.year(),
        total_co2: round_mass(total),
        by_scope: ScopeTotals {
            scope1: round_mass(scopes.scope1),
            scope2: round_mass(scopes.scope2),
            scope3: round_mass(scopes.scope3),
        },
        by_category,
        log_count: logs.len() as u64,
    }
}

/// Aggregates the emissions of a business for one calendar month.
#[instrument(skip(store))]
pub async fn aggregate(
    store: &dyn CarbonStore,
    business_id: i32,
    month: u32,
    year: i32,
) -> Result<MonthlyEmissions> {
    let period = MonthPeriod::new(year, month)?;
    ensure_business_exists(store, business_id).await?;
    aggregate_period(store, business_id, &period).await
}

pub(crate) async fn aggregate_period(
    store: &dyn CarbonStore,
    business_id: i32,
    period: &MonthPeriod,
) -> Result<MonthlyEmissions> {
    let logs = store
        .find_logs_by_business_and_date_range(business_id, period.first_day(), period.last_day())
        .await?;

    let summary = summarize(period, &logs);
    debug!(
        "Business {} emitted {} kg CO2 in {} over {} logs",
        business_id,
        summary.total_co2,
        period.label(),
        summary.log_count
    );
    Ok(summary)
}

pub(crate) async fn ensure_business_exists(
    store: &dyn CarbonStore,
    business_id: i32,
) -> Result<model::entities::business::Model> {
    store
        .find_business_by_id(business_id)
        .await?
        .ok_or_else(|| CarbonError::not_found("Business", business_id))
}
