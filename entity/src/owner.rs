//! A corporation whose structures and notifications are synchronized.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "owner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// EVE Online corporation ID.
    #[sea_orm(unique)]
    pub corporation_id: i64,
    pub corporation_name: String,
    /// Inactive owners are skipped by all sync cycles.
    pub is_active: bool,
    /// Whether this owner counts towards the overall service status.
    pub is_included_in_service_status: bool,
    /// When false, forwarded messages for this owner never carry pings.
    pub has_default_pings_enabled: bool,
    /// Last state reported by the health monitor, None until first check.
    pub is_up: Option<bool>,
    pub structures_last_update_at: Option<DateTime>,
    pub notifications_last_update_at: Option<DateTime>,
    pub assets_last_update_at: Option<DateTime>,
    pub forwarding_last_update_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::owner_character::Entity")]
    OwnerCharacter,
    #[sea_orm(has_many = "super::structure::Entity")]
    Structure,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
    #[sea_orm(has_many = "super::owner_asset::Entity")]
    OwnerAsset,
}

impl Related<super::owner_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnerCharacter.def()
    }
}

impl Related<super::structure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Structure.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
