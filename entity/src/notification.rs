//! A raw notification received from ESI or generated locally.
//!
//! Rows are immutable once stored except for the `is_sent` and
//! `is_timer_added` flags.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    /// Game-assigned notification ID; locally generated notifications use
    /// negative IDs to stay clear of the ESI ID space.
    pub notification_id: i64,
    pub sender_id: Option<i64>,
    /// Raw type string from ESI, e.g. "StructureUnderAttack".
    pub notif_type: String,
    /// Free-form YAML payload as received.
    pub text: Option<String>,
    /// Timestamp assigned by the game.
    pub timestamp: DateTime,
    pub is_sent: bool,
    pub is_timer_added: bool,
    /// When this row was first seen locally.
    pub created_at: DateTime,
    pub last_updated_at: DateTime,
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
