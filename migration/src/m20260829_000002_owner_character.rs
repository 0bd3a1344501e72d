use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260829_000001_owner::Owner;

static IDX_OWNER_CHARACTER_OWNER_ID: &str = "idx_owner_character_owner_id";
static IDX_OWNER_CHARACTER_UNIQUE: &str = "idx_owner_character_owner_id_character_id";
static FK_OWNER_CHARACTER_OWNER_ID: &str = "fk_owner_character_owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnerCharacter::Table)
                    .if_not_exists()
                    .col(pk_auto(OwnerCharacter::Id))
                    .col(integer(OwnerCharacter::OwnerId))
                    .col(big_integer(OwnerCharacter::CharacterId))
                    .col(string(OwnerCharacter::CharacterName))
                    .col(string(OwnerCharacter::Token))
                    .col(boolean(OwnerCharacter::IsValid))
                    .col(timestamp_null(OwnerCharacter::StructuresLastUsedAt))
                    .col(timestamp_null(OwnerCharacter::NotificationsLastUsedAt))
                    .col(timestamp_null(OwnerCharacter::AssetsLastUsedAt))
                    .col(timestamp(OwnerCharacter::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER_CHARACTER_OWNER_ID)
                    .table(OwnerCharacter::Table)
                    .col(OwnerCharacter::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER_CHARACTER_UNIQUE)
                    .table(OwnerCharacter::Table)
                    .col(OwnerCharacter::OwnerId)
                    .col(OwnerCharacter::CharacterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_OWNER_CHARACTER_OWNER_ID)
                    .from_tbl(OwnerCharacter::Table)
                    .from_col(OwnerCharacter::OwnerId)
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
                    .name(FK_OWNER_CHARACTER_OWNER_ID)
                    .table(OwnerCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OWNER_CHARACTER_UNIQUE)
                    .table(OwnerCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OWNER_CHARACTER_OWNER_ID)
                    .table(OwnerCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OwnerCharacter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OwnerCharacter {
    Table,
    Id,
    OwnerId,
    CharacterId,
    CharacterName,
    Token,
    IsValid,
    StructuresLastUsedAt,
    NotificationsLastUsedAt,
    AssetsLastUsedAt,
    CreatedAt,
}
