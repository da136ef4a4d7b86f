use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::activity_category;

/// Emission factor of a category: kg CO2 produced per unit of activity.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "emission_factors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// One factor per category.
    #[sea_orm(unique)]
    pub category_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 6)))")]
    pub factor: Decimal,
    /// The factor's own unit, e.g. "kg CO2 per litre".
    pub unit: String,
    /// Provenance label, e.g. "IPCC 2023".
    pub source: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "activity_category::Entity",
        from = "Column::CategoryId",
        to = "activity_category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<activity_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
