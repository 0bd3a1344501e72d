use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260829_000006_notification::Notification, m20260829_000007_webhook::Webhook};

static IDX_NOTIFICATION_DELIVERY_UNIQUE: &str =
    "idx_notification_delivery_notification_id_webhook_id";
static FK_NOTIFICATION_DELIVERY_NOTIFICATION_ID: &str =
    "fk_notification_delivery_notification_id";
static FK_NOTIFICATION_DELIVERY_WEBHOOK_ID: &str = "fk_notification_delivery_webhook_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationDelivery::Table)
                    .if_not_exists()
                    .col(pk_auto(NotificationDelivery::Id))
                    .col(integer(NotificationDelivery::NotificationId))
                    .col(integer(NotificationDelivery::WebhookId))
                    .col(timestamp(NotificationDelivery::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_DELIVERY_UNIQUE)
                    .table(NotificationDelivery::Table)
                    .col(NotificationDelivery::NotificationId)
                    .col(NotificationDelivery::WebhookId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NOTIFICATION_DELIVERY_NOTIFICATION_ID)
                    .from_tbl(NotificationDelivery::Table)
                    .from_col(NotificationDelivery::NotificationId)
                    .to_tbl(Notification::Table)
                    .to_col(Notification::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NOTIFICATION_DELIVERY_WEBHOOK_ID)
                    .from_tbl(NotificationDelivery::Table)
                    .from_col(NotificationDelivery::WebhookId)
                    .to_tbl(Webhook::Table)
                    .to_col(Webhook::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationDelivery::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum NotificationDelivery {
    Table,
    Id,
    NotificationId,
    WebhookId,
    CreatedAt,
}
