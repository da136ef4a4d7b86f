use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::business;

/// Cached intensity score of a business for one calendar month.
///
/// Unique per `(business_id, month, year)`; every scoring run overwrites the
/// row, so it always holds the most recent computation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carbon_intensity_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub business_id: i32,
    pub month: i32,
    pub year: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub score: Decimal,
    pub computed_at: NaiveDateTime,
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
}

impl Related<business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
