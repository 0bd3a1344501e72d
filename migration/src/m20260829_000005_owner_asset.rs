use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260829_000001_owner::Owner;

static IDX_OWNER_ASSET_OWNER_ID: &str = "idx_owner_asset_owner_id";
static IDX_OWNER_ASSET_LOCATION_ID: &str = "idx_owner_asset_location_id";
static FK_OWNER_ASSET_OWNER_ID: &str = "fk_owner_asset_owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnerAsset::Table)
                    .if_not_exists()
                    .col(big_integer(OwnerAsset::ItemId).primary_key())
                    .col(integer(OwnerAsset::OwnerId))
                    .col(big_integer(OwnerAsset::EveTypeId))
                    .col(big_integer(OwnerAsset::LocationId))
                    .col(string(OwnerAsset::LocationFlag))
                    .col(big_integer(OwnerAsset::Quantity))
                    .col(timestamp(OwnerAsset::LastUpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER_ASSET_OWNER_ID)
                    .table(OwnerAsset::Table)
                    .col(OwnerAsset::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER_ASSET_LOCATION_ID)
                    .table(OwnerAsset::Table)
                    .col(OwnerAsset::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_OWNER_ASSET_OWNER_ID)
                    .from_tbl(OwnerAsset::Table)
                    .from_col(OwnerAsset::OwnerId)
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
                    .name(FK_OWNER_ASSET_OWNER_ID)
                    .table(OwnerAsset::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OWNER_ASSET_LOCATION_ID)
                    .table(OwnerAsset::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OWNER_ASSET_OWNER_ID)
                    .table(OwnerAsset::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OwnerAsset::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OwnerAsset {
    Table,
    ItemId,
    OwnerId,
    EveTypeId,
    LocationId,
    LocationFlag,
    Quantity,
    LastUpdatedAt,
}
