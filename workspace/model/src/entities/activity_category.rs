use sea_orm::entity::prelude::*;

use super::{activity_log, emission_factor};

/// GHG Protocol emission scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Scope {
    /// Direct emissions from owned or controlled sources.
    #[sea_orm(num_value = 1)]
    Direct,
    /// Indirect emissions from purchased energy.
    #[sea_orm(num_value = 2)]
    IndirectEnergy,
    /// Value-chain emissions.
    #[sea_orm(num_value = 3)]
    ValueChain,
}

impl Scope {
    pub fn number(self) -> i32 {
        match self {
            Scope::Direct => 1,
            Scope::IndirectEnergy => 2,
            Scope::ValueChain => 3,
        }
    }

    pub fn from_number(value: i32) -> Option<Self> {
        match value {
            1 => Some(Scope::Direct),
            2 => Some(Scope::IndirectEnergy),
            3 => Some(Scope::ValueChain),
            _ => None,
        }
    }

    /// Human readable name used in catalog listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Scope::Direct => "Direct Emissions",
            Scope::IndirectEnergy => "Indirect Energy",
            Scope::ValueChain => "Value Chain",
        }
    }
}

/// An activity that produces emissions, e.g. "Diesel" measured in litres.
/// Reference data: seeded from the catalog and never edited by users.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    /// Unit the quantity of a log is expressed in (litres, kWh, km...).
    pub unit: String,
    pub scope: Scope,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "emission_factor::Entity")]
    EmissionFactor,
    #[sea_orm(has_many = "activity_log::Entity")]
    ActivityLog,
}

impl Related<emission_factor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmissionFactor.def()
    }
}

impl Related<activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
