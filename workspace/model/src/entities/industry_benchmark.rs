use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Average monthly emissions of an industry, the baseline for scoring.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "industry_benchmarks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub industry: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub avg_monthly_emissions: Decimal,
    pub unit: String,
    pub source: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
