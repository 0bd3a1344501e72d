//! A credentialed character used to sync one owner.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "owner_character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub character_id: i64,
    pub character_name: String,
    /// Opaque access token reference, issued by the host auth platform.
    pub token: String,
    /// Cleared when ESI reports the token or role as no longer valid.
    pub is_valid: bool,
    pub structures_last_used_at: Option<DateTime>,
    pub notifications_last_used_at: Option<DateTime>,
    pub assets_last_used_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owner::Entity",
        from = "Column::OwnerId",
        to = "super::owner::Column::Id"
    )]
    Owner,
}

impl Related<super::owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
