//! Write path of activity logs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use common::EmissionCalculation;
use model::entities::activity_category::Scope;
use model::entities::activity_log;

use crate::aggregate::ensure_business_exists;
use crate::calculator::{calculate, ensure_positive_quantity};
use crate::error::{CarbonError, Result};
use crate::store::{CarbonStore, NewLog};

/// An activity as submitted by a business.
#[derive(Debug, Clone)]
pub struct ActivityInput {
    pub category_id: i32,
    pub quantity: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Validates the activity, runs the calculator and stores the log with the
/// frozen CO2 amount and scope.
#[instrument(skip(store, input), fields(category_id = input.category_id))]
pub async fn record_activity(
    store: &dyn CarbonStore,
    business_id: i32,
    input: ActivityInput,
) -> Result<(activity_log::Model, EmissionCalculation)> {
    ensure_positive_quantity(input.quantity)?;
    ensure_business_exists(store, business_id).await?;

    let calculation = calculate(store, input.category_id, input.quantity).await?;
    let scope = Scope::from_number(calculation.scope).ok_or_else(|| {
        CarbonError::Configuration(format!("category has invalid scope {}", calculation.scope))
    })?;

    let log = store
        .create_log(NewLog {
            business_id,
            category_id: input.category_id,
            quantity: input.quantity,
            co2_amount: calculation.co2_amount,
            scope,
            date: input.date,
            notes: input.notes,
        })
        .await?;

    info!(
        "Logged {} kg CO2 of {} for business {}",
        log.co2_amount, calculation.category_name, business_id
    );
    Ok((log, calculation))
}

/// Loads a log, checking it belongs to `business_id`.
#[instrument(skip(store))]
pub async fn find_owned_activity(
    store: &dyn CarbonStore,
    business_id: i32,
    log_id: i32,
) -> Result<activity_log::Model> {
    let log = store
        .find_log_by_id(log_id)
        .await?
        .ok_or_else(|| CarbonError::not_found("Activity log", log_id))?;

    if log.business_id != business_id {
        warn!(
            "Business {} tried to access log {} owned by business {}",
            business_id, log_id, log.business_id
        );
        return Err(CarbonError::AccessDenied {
            log_id,
            business_id,
        });
    }
    Ok(log)
}

/// Deletes a log owned by `business_id`.
#[instrument(skip(store))]
pub async fn remove_activity(store: &dyn CarbonStore, business_id: i32, log_id: i32) -> Result<()> {
    find_owned_activity(store, business_id, log_id).await?;
    store.delete_log(log_id).await?;
    info!("Deleted activity log {}", log_id);
    Ok(())
}
