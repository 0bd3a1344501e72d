use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JumpFuelAlertConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(JumpFuelAlertConfig::Id))
                    .col(integer(JumpFuelAlertConfig::Threshold))
                    .col(string(JumpFuelAlertConfig::ChannelPingType))
                    .col(integer_null(JumpFuelAlertConfig::Color))
                    .col(boolean(JumpFuelAlertConfig::IsEnabled))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JumpFuelAlertConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum JumpFuelAlertConfig {
    Table,
    Id,
    Threshold,
    ChannelPingType,
    Color,
    IsEnabled,
}
