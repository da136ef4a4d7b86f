use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use migration::{Migrator, MigratorTrait};
use model::entities::activity_category::Scope;
use model::entities::{
    activity_category, activity_log, business, emission_factor, industry_benchmark, user,
};

use crate::store::SeaOrmStore;

pub type Result<T> = std::result::Result<T, DbErr>;

static NAME_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NAME_ID.fetch_add(1, Ordering::SeqCst)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn setup_store() -> Result<SeaOrmStore> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    Migrator::up(&db, None).await?;
    Ok(SeaOrmStore::new(db))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub async fn new_category(
    db: &DatabaseConnection,
    name: &str,
    unit: &str,
    scope: Scope,
    factor: Decimal,
) -> Result<(activity_category::Model, emission_factor::Model)> {
    let category = activity_category::ActiveModel {
        name: Set(name.to_string()),
        unit: Set(unit.to_string()),
        scope: Set(scope),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let factor = emission_factor::ActiveModel {
        category_id: Set(category.id),
        factor: Set(factor),
        unit: Set(format!("kg CO2 per {}", unit)),
        source: Set("IPCC 2023".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok((category, factor))
}

/// A category that was never given a factor.
pub async fn new_category_without_factor(
    db: &DatabaseConnection,
    name: &str,
) -> Result<activity_category::Model> {
    activity_category::ActiveModel {
        name: Set(name.to_string()),
        unit: Set("kg".to_string()),
        scope: Set(Scope::ValueChain),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_benchmark(
    db: &DatabaseConnection,
    industry: &str,
    avg_monthly_emissions: Decimal,
) -> Result<industry_benchmark::Model> {
    industry_benchmark::ActiveModel {
        industry: Set(industry.to_string()),
        avg_monthly_emissions: Set(avg_monthly_emissions),
        unit: Set("kg CO2 per month".to_string()),
        source: Set("GHG Protocol SME Report 2023".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_business(db: &DatabaseConnection, industry: &str) -> Result<business::Model> {
    let current_id = next_id();
    let user = user::ActiveModel {
        username: Set(format!("user_{}", current_id)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    business::ActiveModel {
        user_id: Set(user.id),
        name: Set(format!("Business {}", current_id)),
        industry: Set(industry.to_string()),
        location: Set("Pune".to_string()),
        employee_count: Set(12),
        annual_revenue: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a log with an explicit CO2 amount, bypassing the calculator.
pub async fn new_log(
    db: &DatabaseConnection,
    business: &business::Model,
    category: &activity_category::Model,
    co2_amount: Decimal,
    date: NaiveDate,
) -> Result<activity_log::Model> {
    activity_log::ActiveModel {
        business_id: Set(business.id),
        category_id: Set(category.id),
        quantity: Set(Decimal::ONE),
        co2_amount: Set(co2_amount),
        scope: Set(category.scope),
        date: Set(date),
        notes: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}
