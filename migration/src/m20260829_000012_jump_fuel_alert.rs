use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260829_000003_structure::Structure,
    m20260829_000011_jump_fuel_alert_config::JumpFuelAlertConfig,
};

static IDX_JUMP_FUEL_ALERT_UNIQUE: &str = "idx_jump_fuel_alert_structure_id_config_id";
static FK_JUMP_FUEL_ALERT_STRUCTURE_ID: &str = "fk_jump_fuel_alert_structure_id";
static FK_JUMP_FUEL_ALERT_CONFIG_ID: &str = "fk_jump_fuel_alert_config_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JumpFuelAlert::Table)
                    .if_not_exists()
                    .col(pk_auto(JumpFuelAlert::Id))
                    .col(big_integer(JumpFuelAlert::StructureId))
                    .col(integer(JumpFuelAlert::ConfigId))
                    .col(timestamp(JumpFuelAlert::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_JUMP_FUEL_ALERT_UNIQUE)
                    .table(JumpFuelAlert::Table)
                    .col(JumpFuelAlert::StructureId)
                    .col(JumpFuelAlert::ConfigId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_JUMP_FUEL_ALERT_STRUCTURE_ID)
                    .from_tbl(JumpFuelAlert::Table)
                    .from_col(JumpFuelAlert::StructureId)
                    .to_tbl(Structure::Table)
                    .to_col(Structure::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_JUMP_FUEL_ALERT_CONFIG_ID)
                    .from_tbl(JumpFuelAlert::Table)
                    .from_col(JumpFuelAlert::ConfigId)
                    .to_tbl(JumpFuelAlertConfig::Table)
                    .to_col(JumpFuelAlertConfig::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JumpFuelAlert::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum JumpFuelAlert {
    Table,
    Id,
    StructureId,
    ConfigId,
    CreatedAt,
}
