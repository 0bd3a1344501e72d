use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Webhook::Table)
                    .if_not_exists()
                    .col(pk_auto(Webhook::Id))
                    .col(string_uniq(Webhook::Name))
                    .col(string(Webhook::Url))
                    .col(json(Webhook::NotificationTypes))
                    .col(boolean(Webhook::IsActive))
                    .col(boolean(Webhook::IsDefault))
                    .col(boolean(Webhook::HasDefaultPingsEnabled))
                    .col(string_null(Webhook::PingGroup))
                    .col(string_null(Webhook::LanguageCode))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Webhook::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Webhook {
    Table,
    Id,
    Name,
    Url,
    NotificationTypes,
    IsActive,
    IsDefault,
    HasDefaultPingsEnabled,
    PingGroup,
    LanguageCode,
}
