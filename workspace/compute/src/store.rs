//! Persistence port of the engine.
//!
//! Engine functions only talk to a [`CarbonStore`]; the HTTP layer injects
//! a [`SeaOrmStore`] opened at process start.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{debug, instrument, trace};

use model::entities::activity_category::{self, Scope};
use model::entities::prelude::*;
use model::entities::{
    activity_log, business, carbon_intensity_score, emission_factor, industry_benchmark,
};

use crate::error::{CarbonError, Result};

/// An activity log together with the name of its category.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub log: activity_log::Model,
    pub category_name: String,
}

/// Fields of a log about to be created. `co2_amount` and `scope` are
/// frozen copies taken at calculation time.
#[derive(Debug, Clone)]
pub struct NewLog {
    pub business_id: i32,
    pub category_id: i32,
    pub quantity: Decimal,
    pub co2_amount: Decimal,
    pub scope: Scope,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[async_trait]
pub trait CarbonStore: Send + Sync + std::fmt::Debug {
    async fn find_category_with_factor(
        &self,
        category_id: i32,
    ) -> Result<Option<(activity_category::Model, Option<emission_factor::Model>)>>;

    /// Logs of a business with `start <= date <= end`, oldest first.
    async fn find_logs_by_business_and_date_range(
        &self,
        business_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LogRecord>>;

    async fn find_benchmark_by_industry(
        &self,
        industry: &str,
    ) -> Result<Option<industry_benchmark::Model>>;

    async fn find_business_by_id(&self, business_id: i32) -> Result<Option<business::Model>>;

    async fn find_log_by_id(&self, log_id: i32) -> Result<Option<activity_log::Model>>;

    async fn create_log(&self, log: NewLog) -> Result<activity_log::Model>;

    async fn delete_log(&self, log_id: i32) -> Result<()>;

    /// Inserts or overwrites the cached score of `(business, month, year)`.
    async fn upsert_score(
        &self,
        business_id: i32,
        month: i32,
        year: i32,
        score: Decimal,
    ) -> Result<carbon_intensity_score::Model>;

    /// Most recent cached scores, newest period first.
    async fn recent_scores(
        &self,
        business_id: i32,
        limit: u64,
    ) -> Result<Vec<carbon_intensity_score::Model>>;
}

/// [`CarbonStore`] backed by a SeaORM connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CarbonStore for SeaOrmStore {
    #[instrument(skip(self))]
    async fn find_category_with_factor(
        &self,
        category_id: i32,
    ) -> Result<Option<(activity_category::Model, Option<emission_factor::Model>)>> {
        let found = ActivityCategory::find_by_id(category_id)
            .find_also_related(EmissionFactor)
            .one(&self.db)
            .await?;
        trace!("Category lookup result: {:?}", found);
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn find_logs_by_business_and_date_range(
        &self,
        business_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LogRecord>> {
        let rows = ActivityLog::find()
            .filter(activity_log::Column::BusinessId.eq(business_id))
            .filter(activity_log::Column::Date.between(start, end))
            .find_also_related(ActivityCategory)
            .order_by_asc(activity_log::Column::Date)
            .order_by_asc(activity_log::Column::Id)
            .all(&self.db)
            .await?;

        debug!("Found {} logs between {} and {}", rows.len(), start, end);

        rows.into_iter()
            .map(|(log, category)| {
                let category = category.ok_or_else(|| {
                    CarbonError::Configuration(format!(
                        "activity log {} references missing category {}",
                        log.id, log.category_id
                    ))
                })?;
                Ok(LogRecord {
                    log,
                    category_name: category.name,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn find_benchmark_by_industry(
        &self,
        industry: &str,
    ) -> Result<Option<industry_benchmark::Model>> {
        Ok(IndustryBenchmark::find()
            .filter(industry_benchmark::Column::Industry.eq(industry))
            .one(&self.db)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_business_by_id(&self, business_id: i32) -> Result<Option<business::Model>> {
        Ok(Business::find_by_id(business_id).one(&self.db).await?)
    }

    #[instrument(skip(self))]
    async fn find_log_by_id(&self, log_id: i32) -> Result<Option<activity_log::Model>> {
        Ok(ActivityLog::find_by_id(log_id).one(&self.db).await?)
    }

    #[instrument(skip(self, log), fields(business_id = log.business_id, category_id = log.category_id))]
    async fn create_log(&self, log: NewLog) -> Result<activity_log::Model> {
        let created = activity_log::ActiveModel {
            business_id: Set(log.business_id),
            category_id: Set(log.category_id),
            quantity: Set(log.quantity),
            co2_amount: Set(log.co2_amount),
            scope: Set(log.scope),
            date: Set(log.date),
            notes: Set(log.notes),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        debug!("Created activity log {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete_log(&self, log_id: i32) -> Result<()> {
        let result = ActivityLog::delete_by_id(log_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(CarbonError::not_found("Activity log", log_id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn upsert_score(
        &self,
        business_id: i32,
        month: i32,
        year: i32,
        score: Decimal,
    ) -> Result<carbon_intensity_score::Model> {
        let row = carbon_intensity_score::ActiveModel {
            business_id: Set(business_id),
            month: Set(month),
            year: Set(year),
            score: Set(score),
            computed_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        CarbonIntensityScore::insert(row)
            .on_conflict(
                OnConflict::columns([
                    carbon_intensity_score::Column::BusinessId,
                    carbon_intensity_score::Column::Month,
                    carbon_intensity_score::Column::Year,
                ])
                .update_columns([
                    carbon_intensity_score::Column::Score,
                    carbon_intensity_score::Column::ComputedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;

        // Re-read: the insert id is unreliable when the conflict branch ran.
        CarbonIntensityScore::find()
            .filter(carbon_intensity_score::Column::BusinessId.eq(business_id))
            .filter(carbon_intensity_score::Column::Month.eq(month))
            .filter(carbon_intensity_score::Column::Year.eq(year))
            .one(&self.db)
            .await?
            .ok_or_else(|| CarbonError::not_found("Carbon intensity score", business_id))
    }

    #[instrument(skip(self))]
    async fn recent_scores(
        &self,
        business_id: i32,
        limit: u64,
    ) -> Result<Vec<carbon_intensity_score::Model>> {
        Ok(CarbonIntensityScore::find()
            .filter(carbon_intensity_score::Column::BusinessId.eq(business_id))
            .order_by_desc(carbon_intensity_score::Column::Year)
            .order_by_desc(carbon_intensity_score::Column::Month)
            .limit(limit)
            .all(&self.db)
            .await?)
    }
}
