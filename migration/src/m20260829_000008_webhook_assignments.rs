use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260829_000001_owner::Owner, m20260829_000003_structure::Structure,
    m20260829_000007_webhook::Webhook,
};

static IDX_OWNER_WEBHOOK_UNIQUE: &str = "idx_owner_webhook_owner_id_webhook_id";
static IDX_STRUCTURE_WEBHOOK_UNIQUE: &str = "idx_structure_webhook_structure_id_webhook_id";
static FK_OWNER_WEBHOOK_OWNER_ID: &str = "fk_owner_webhook_owner_id";
static FK_OWNER_WEBHOOK_WEBHOOK_ID: &str = "fk_owner_webhook_webhook_id";
static FK_STRUCTURE_WEBHOOK_STRUCTURE_ID: &str = "fk_structure_webhook_structure_id";
static FK_STRUCTURE_WEBHOOK_WEBHOOK_ID: &str = "fk_structure_webhook_webhook_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnerWebhook::Table)
                    .if_not_exists()
                    .col(pk_auto(OwnerWebhook::Id))
                    .col(integer(OwnerWebhook::OwnerId))
                    .col(integer(OwnerWebhook::WebhookId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER_WEBHOOK_UNIQUE)
                    .table(OwnerWebhook::Table)
                    .col(OwnerWebhook::OwnerId)
                    .col(OwnerWebhook::WebhookId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_OWNER_WEBHOOK_OWNER_ID)
                    .from_tbl(OwnerWebhook::Table)
                    .from_col(OwnerWebhook::OwnerId)
                    .to_tbl(Owner::Table)
                    .to_col(Owner::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_OWNER_WEBHOOK_WEBHOOK_ID)
                    .from_tbl(OwnerWebhook::Table)
                    .from_col(OwnerWebhook::WebhookId)
                    .to_tbl(Webhook::Table)
                    .to_col(Webhook::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StructureWebhook::Table)
                    .if_not_exists()
                    .col(pk_auto(StructureWebhook::Id))
                    .col(big_integer(StructureWebhook::StructureId))
                    .col(integer(StructureWebhook::WebhookId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STRUCTURE_WEBHOOK_UNIQUE)
                    .table(StructureWebhook::Table)
                    .col(StructureWebhook::StructureId)
                    .col(StructureWebhook::WebhookId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STRUCTURE_WEBHOOK_STRUCTURE_ID)
                    .from_tbl(StructureWebhook::Table)
                    .from_col(StructureWebhook::StructureId)
                    .to_tbl(Structure::Table)
                    .to_col(Structure::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STRUCTURE_WEBHOOK_WEBHOOK_ID)
                    .from_tbl(StructureWebhook::Table)
                    .from_col(StructureWebhook::WebhookId)
                    .to_tbl(Webhook::Table)
                    .to_col(Webhook::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StructureWebhook::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(OwnerWebhook::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OwnerWebhook {
    Table,
    Id,
    OwnerId,
    WebhookId,
}

#[derive(DeriveIden)]
pub enum StructureWebhook {
    Table,
    Id,
    StructureId,
    WebhookId,
}
