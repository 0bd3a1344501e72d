use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260829_000003_structure::Structure;

static IDX_STRUCTURE_SERVICE_UNIQUE: &str = "idx_structure_service_structure_id_name";
static FK_STRUCTURE_SERVICE_STRUCTURE_ID: &str = "fk_structure_service_structure_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StructureService::Table)
                    .if_not_exists()
                    .col(pk_auto(StructureService::Id))
                    .col(big_integer(StructureService::StructureId))
                    .col(string(StructureService::Name))
                    .col(string(StructureService::State))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STRUCTURE_SERVICE_UNIQUE)
                    .table(StructureService::Table)
                    .col(StructureService::StructureId)
                    .col(StructureService::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STRUCTURE_SERVICE_STRUCTURE_ID)
                    .from_tbl(StructureService::Table)
                    .from_col(StructureService::StructureId)
                    .to_tbl(Structure::Table)
                    .to_col(Structure::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STRUCTURE_SERVICE_STRUCTURE_ID)
                    .table(StructureService::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STRUCTURE_SERVICE_UNIQUE)
                    .table(StructureService::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StructureService::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StructureService {
    Table,
    Id,
    StructureId,
    Name,
    State,
}
