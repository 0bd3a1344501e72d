use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260829_000003_structure::Structure, m20260829_000009_fuel_alert_config::FuelAlertConfig,
};

static IDX_FUEL_ALERT_UNIQUE: &str = "idx_fuel_alert_structure_id_config_id_hours";
static FK_FUEL_ALERT_STRUCTURE_ID: &str = "fk_fuel_alert_structure_id";
static FK_FUEL_ALERT_CONFIG_ID: &str = "fk_fuel_alert_config_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FuelAlert::Table)
                    .if_not_exists()
                    .col(pk_auto(FuelAlert::Id))
                    .col(big_integer(FuelAlert::StructureId))
                    .col(integer(FuelAlert::ConfigId))
                    .col(integer(FuelAlert::Hours))
                    .col(timestamp(FuelAlert::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FUEL_ALERT_UNIQUE)
                    .table(FuelAlert::Table)
                    .col(FuelAlert::StructureId)
                    .col(FuelAlert::ConfigId)
                    .col(FuelAlert::Hours)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_FUEL_ALERT_STRUCTURE_ID)
                    .from_tbl(FuelAlert::Table)
                    .from_col(FuelAlert::StructureId)
                    .to_tbl(Structure::Table)
                    .to_col(Structure::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_FUEL_ALERT_CONFIG_ID)
                    .from_tbl(FuelAlert::Table)
                    .from_col(FuelAlert::ConfigId)
                    .to_tbl(FuelAlertConfig::Table)
                    .to_col(FuelAlertConfig::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FuelAlert::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FuelAlert {
    Table,
    Id,
    StructureId,
    ConfigId,
    Hours,
    CreatedAt,
}
