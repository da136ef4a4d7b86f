use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{activity_log, carbon_intensity_score, user};

/// A business profile. Every activity log and score belongs to exactly one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The owning user; unique, so a user has zero or one profile.
    #[sea_orm(unique)]
    pub user_id: i32,
    pub name: String,
    /// Must match an `industry_benchmarks.industry` row.
    pub industry: String,
    pub location: String,
    pub employee_count: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub annual_revenue: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "activity_log::Entity")]
    ActivityLog,
    #[sea_orm(has_many = "carbon_intensity_score::Entity")]
    CarbonIntensityScore,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl Related<carbon_intensity_score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarbonIntensityScore.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
