//! A player-owned structure tracked for one owner.
//!
//! The primary key is the game-assigned structure ID so that a structure
//! keeps its identity across consecutive syncs and ownership transfers.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "structure")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub owner_id: i32,
    pub name: String,
    pub eve_type_id: i64,
    pub type_name: String,
    pub solar_system_id: i64,
    pub solar_system_name: String,
    /// Security status of the solar system, used for timer exclusions.
    pub solar_system_security: f64,
    /// One of: upwell, poco, starbase.
    pub category: String,
    /// Raw state string from ESI, e.g. "shield_vulnerable".
    pub state: String,
    pub fuel_expires_at: Option<DateTime>,
    pub last_online_at: Option<DateTime>,
    /// Reinforcement window, set while the structure is reinforced.
    pub state_timer_start: Option<DateTime>,
    pub state_timer_end: Option<DateTime>,
    pub unanchors_at: Option<DateTime>,
    pub reinforce_hour: Option<i32>,
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
    #[sea_orm(has_many = "super::structure_service::Entity")]
    StructureService,
    #[sea_orm(has_many = "super::fuel_alert::Entity")]
    FuelAlert,
}

impl Related<super::owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::structure_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StructureService.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
