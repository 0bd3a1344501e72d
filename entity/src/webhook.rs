//! An outbound Discord webhook endpoint configuration.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "webhook")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub url: String,
    /// JSON array of notification type strings enabled for this webhook.
    pub notification_types: Json,
    pub is_active: bool,
    /// Default webhooks are assigned to newly created owners.
    pub is_default: bool,
    /// When false, messages to this webhook never carry @here/@everyone.
    pub has_default_pings_enabled: bool,
    /// Optional group mention added to every ping, e.g. a Discord role ID.
    pub ping_group: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::owner_webhook::Entity")]
    OwnerWebhook,
    #[sea_orm(has_many = "super::structure_webhook::Entity")]
    StructureWebhook,
}

impl ActiveModelBehavior for ActiveModel {}
