use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260829_000001_owner::Owner;

static IDX_STRUCTURE_OWNER_ID: &str = "idx_structure_owner_id";
static FK_STRUCTURE_OWNER_ID: &str = "fk_structure_owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Structure::Table)
                    .if_not_exists()
                    .col(big_integer(Structure::Id).primary_key())
                    .col(integer(Structure::OwnerId))
                    .col(string(Structure::Name))
                    .col(big_integer(Structure::EveTypeId))
                    .col(string(Structure::TypeName))
                    .col(big_integer(Structure::SolarSystemId))
                    .col(string(Structure::SolarSystemName))
                    .col(double(Structure::SolarSystemSecurity))
                    .col(string(Structure::Category))
                    .col(string(Structure::State))
                    .col(timestamp_null(Structure::FuelExpiresAt))
                    .col(timestamp_null(Structure::LastOnlineAt))
                    .col(timestamp_null(Structure::StateTimerStart))
                    .col(timestamp_null(Structure::StateTimerEnd))
                    .col(timestamp_null(Structure::UnanchorsAt))
                    .col(integer_null(Structure::ReinforceHour))
                    .col(timestamp(Structure::CreatedAt))
                    .col(timestamp(Structure::LastUpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STRUCTURE_OWNER_ID)
                    .table(Structure::Table)
                    .col(Structure::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STRUCTURE_OWNER_ID)
                    .from_tbl(Structure::Table)
                    .from_col(Structure::OwnerId)
                    .to_tbl(Owner::Table)
                    .to_col(Owner::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STRUCTURE_OWNER_ID)
                    .table(Structure::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STRUCTURE_OWNER_ID)
                    .table(Structure::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Structure::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Structure {
    Table,
    Id,
    OwnerId,
    Name,
    EveTypeId,
    TypeName,
    SolarSystemId,
    SolarSystemName,
    SolarSystemSecurity,
    Category,
    State,
    FuelExpiresAt,
    LastOnlineAt,
    StateTimerStart,
    StateTimerEnd,
    UnanchorsAt,
    ReinforceHour,
    CreatedAt,
    LastUpdatedAt,
}
