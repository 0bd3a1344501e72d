use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260829_000001_owner::Owner;

static IDX_NOTIFICATION_UNIQUE: &str = "idx_notification_owner_id_notification_id";
static IDX_NOTIFICATION_TIMESTAMP: &str = "idx_notification_timestamp";
static FK_NOTIFICATION_OWNER_ID: &str = "fk_notification_owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::OwnerId))
                    .col(big_integer(Notification::NotificationId))
                    .col(big_integer_null(Notification::SenderId))
                    .col(string(Notification::NotifType))
                    .col(text_null(Notification::Text))
                    .col(timestamp(Notification::Timestamp))
                    .col(boolean(Notification::IsSent))
                    .col(boolean(Notification::IsTimerAdded))
                    .col(timestamp(Notification::CreatedAt))
                    .col(timestamp(Notification::LastUpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_UNIQUE)
                    .table(Notification::Table)
                    .col(Notification::OwnerId)
                    .col(Notification::NotificationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_TIMESTAMP)
                    .table(Notification::Table)
                    .col(Notification::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NOTIFICATION_OWNER_ID)
                    .from_tbl(Notification::Table)
                    .from_col(Notification::OwnerId)
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
                    .name(FK_NOTIFICATION_OWNER_ID)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NOTIFICATION_TIMESTAMP)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NOTIFICATION_UNIQUE)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    OwnerId,
    NotificationId,
    SenderId,
    NotifType,
    Text,
    Timestamp,
    IsSent,
    IsTimerAdded,
    CreatedAt,
    LastUpdatedAt,
}
