use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FuelAlertConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(FuelAlertConfig::Id))
                    .col(integer(FuelAlertConfig::Start))
                    .col(integer(FuelAlertConfig::End))
                    .col(integer(FuelAlertConfig::Repeat))
                    .col(string(FuelAlertConfig::ChannelPingType))
                    .col(integer_null(FuelAlertConfig::Color))
                    .col(boolean(FuelAlertConfig::IsEnabled))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FuelAlertConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FuelAlertConfig {
    Table,
    Id,
    Start,
    End,
    Repeat,
    ChannelPingType,
    Color,
    IsEnabled,
}
