pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_catalog_tables;
mod m20260101_000002_create_activity_tables;
pub mod entity_iden;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_catalog_tables::Migration),
            Box::new(m20260101_000002_create_activity_tables::Migration),
        ]
    }
}
