use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{activity_category, activity_log, business, carbon_intensity_score};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create activity_logs table
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::table())
                    .if_not_exists()
                    .col(pk_auto(ActivityLog::column(activity_log::Column::Id)))
                    .col(integer(ActivityLog::column(activity_log::Column::BusinessId)))
                    .col(integer(ActivityLog::column(activity_log::Column::CategoryId)))
                    .col(
                        decimal(ActivityLog::column(activity_log::Column::Quantity))
                            .decimal_len(16, 4),
                    )
                    .col(
                        decimal(ActivityLog::column(activity_log::Column::Co2Amount))
                            .decimal_len(16, 4),
                    )
                    .col(integer(ActivityLog::column(activity_log::Column::Scope)))
                    .col(date(ActivityLog::column(activity_log::Column::Date)))
                    .col(string_null(ActivityLog::column(activity_log::Column::Notes)))
                    .col(date_time(ActivityLog::column(activity_log::Column::CreatedAt)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_business")
                            .from(
                                ActivityLog::table(),
                                ActivityLog::column(activity_log::Column::BusinessId),
                            )
                            .to(Business::table(), Business::column(business::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_category")
                            .from(
                                ActivityLog::table(),
                                ActivityLog::column(activity_log::Column::CategoryId),
                            )
                            .to(
                                ActivityCategory::table(),
                                ActivityCategory::column(activity_category::Column::Id),
                            )
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Monthly aggregation reads logs by business and date range
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_logs_business_date")
                    .table(ActivityLog::table())
                    .col(ActivityLog::column(activity_log::Column::BusinessId))
                    .col(ActivityLog::column(activity_log::Column::Date))
                    .to_owned(),
            )
            .await?;

        // Create carbon_intensity_scores table
        manager
            .create_table(
                Table::create()
                    .table(CarbonIntensityScore::table())
                    .if_not_exists()
                    .col(pk_auto(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::Id,
                    )))
                    .col(integer(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::BusinessId,
                    )))
                    .col(integer(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::Month,
                    )))
                    .col(integer(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::Year,
                    )))
                    .col(
                        decimal(CarbonIntensityScore::column(
                            carbon_intensity_score::Column::Score,
                        ))
                        .decimal_len(5, 2),
                    )
                    .col(date_time(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::ComputedAt,
                    )))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_carbon_intensity_scores_business")
                            .from(
                                CarbonIntensityScore::table(),
                                CarbonIntensityScore::column(
                                    carbon_intensity_score::Column::BusinessId,
                                ),
                            )
                            .to(Business::table(), Business::column(business::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The upsert conflict target: one cached score per business and period
        manager
            .create_index(
                Index::create()
                    .name("idx_carbon_intensity_scores_period")
                    .table(CarbonIntensityScore::table())
                    .col(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::BusinessId,
                    ))
                    .col(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::Month,
                    ))
                    .col(CarbonIntensityScore::column(
                        carbon_intensity_score::Column::Year,
                    ))
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarbonIntensityScore::table()).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityLog::table()).to_owned())
            .await?;

        Ok(())
    }
}
