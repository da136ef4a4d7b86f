use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create activity_categories table
        manager
            .create_table(
                Table::create()
                    .table(ActivityCategories::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityCategories::Id))
                    .col(string(ActivityCategories::Name).unique_key())
                    .col(string(ActivityCategories::Unit))
                    .col(integer(ActivityCategories::Scope))
                    .col(string_null(ActivityCategories::Description))
                    .to_owned(),
            )
            .await?;

        // Create emission_factors table, one row per category
        manager
            .create_table(
                Table::create()
                    .table(EmissionFactors::Table)
                    .if_not_exists()
                    .col(pk_auto(EmissionFactors::Id))
                    .col(integer(EmissionFactors::CategoryId).unique_key())
                    .col(decimal(EmissionFactors::Factor).decimal_len(16, 6))
                    .col(string(EmissionFactors::Unit))
                    .col(string(EmissionFactors::Source))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emission_factors_category")
                            .from(EmissionFactors::Table, EmissionFactors::CategoryId)
                            .to(ActivityCategories::Table, ActivityCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create industry_benchmarks table
        manager
            .create_table(
                Table::create()
                    .table(IndustryBenchmarks::Table)
                    .if_not_exists()
                    .col(pk_auto(IndustryBenchmarks::Id))
                    .col(string(IndustryBenchmarks::Industry).unique_key())
                    .col(decimal(IndustryBenchmarks::AvgMonthlyEmissions).decimal_len(16, 4))
                    .col(string(IndustryBenchmarks::Unit))
                    .col(string(IndustryBenchmarks::Source))
                    .to_owned(),
            )
            .await?;

        // Create businesses table
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(pk_auto(Businesses::Id))
                    .col(integer(Businesses::UserId).unique_key())
                    .col(string(Businesses::Name))
                    .col(string(Businesses::Industry))
                    .col(string(Businesses::Location))
                    .col(integer(Businesses::EmployeeCount))
                    .col(decimal_null(Businesses::AnnualRevenue).decimal_len(16, 2))
                    .col(date_time(Businesses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_user")
                            .from(Businesses::Table, Businesses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of creation
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IndustryBenchmarks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmissionFactors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum ActivityCategories {
    Table,
    Id,
    Name,
    Unit,
    Scope,
    Description,
}

#[derive(DeriveIden)]
enum EmissionFactors {
    Table,
    Id,
    CategoryId,
    Factor,
    Unit,
    Source,
}

#[derive(DeriveIden)]
enum IndustryBenchmarks {
    Table,
    Id,
    Industry,
    AvgMonthlyEmissions,
    Unit,
    Source,
}

#[derive(DeriveIden)]
enum Businesses {
    Table,
    Id,
    UserId,
    Name,
    Industry,
    Location,
    EmployeeCount,
    AnnualRevenue,
    CreatedAt,
}
