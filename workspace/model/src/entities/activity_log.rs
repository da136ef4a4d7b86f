use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::activity_category::{self, Scope};
use super::business;

/// A logged activity of a business.
///
/// `co2_amount` and `scope` are frozen copies taken when the log is created;
/// later factor changes do not touch existing logs. Logs are never updated
/// in place, an edit is a delete followed by a create.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub business_id: i32,
    pub category_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub quantity: Decimal,
    /// kg CO2, rounded to 4 decimal places at creation.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub co2_amount: Decimal,
    pub scope: Scope,
    /// Calendar day the activity happened; used for monthly bucketing.
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "business::Entity",
        from = "Column::BusinessId",
        to = "business::Column::Id",
        on_delete = "Cascade"
    )]
    Business,
    #[sea_orm(
        belongs_to = "activity_category::Entity",
        from = "Column::CategoryId",
        to = "activity_category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl Related<activity_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
