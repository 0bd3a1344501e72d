use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(pk_auto(Owner::Id))
                    .col(big_integer_uniq(Owner::CorporationId))
                    .col(string(Owner::CorporationName))
                    .col(boolean(Owner::IsActive))
                    .col(boolean(Owner::IsIncludedInServiceStatus))
                    .col(boolean(Owner::HasDefaultPingsEnabled))
                    .col(boolean_null(Owner::IsUp))
                    .col(timestamp_null(Owner::StructuresLastUpdateAt))
                    .col(timestamp_null(Owner::NotificationsLastUpdateAt))
                    .col(timestamp_null(Owner::AssetsLastUpdateAt))
                    .col(timestamp_null(Owner::ForwardingLastUpdateAt))
                    .col(timestamp(Owner::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Owner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Owner {
    Table,
    Id,
    CorporationId,
    CorporationName,
    IsActive,
    IsIncludedInServiceStatus,
    HasDefaultPingsEnabled,
    IsUp,
    StructuresLastUpdateAt,
    NotificationsLastUpdateAt,
    AssetsLastUpdateAt,
    ForwardingLastUpdateAt,
    CreatedAt,
}
