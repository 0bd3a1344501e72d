//! Marker recording that a fuel alert was emitted for a structure.
//!
//! The (structure, config, hours) key prevents duplicate alerts within
//! one repeat interval.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fuel_alert")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub structure_id: i64,
    pub config_id: i32,
    /// Hours before fuel expiry at which this alert was due.
    pub hours: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::structure::Entity",
        from = "Column::StructureId",
        to = "super::structure::Column::Id"
    )]
    Structure,
    #[sea_orm(
        belongs_to = "super::fuel_alert_config::Entity",
        from = "Column::ConfigId",
        to = "super::fuel_alert_config::Column::Id"
    )]
    FuelAlertConfig,
}

impl Related<super::structure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Structure.def()
    }
}

impl Related<super::fuel_alert_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FuelAlertConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
