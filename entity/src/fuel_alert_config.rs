//! Threshold rule for structure fuel alerts.
//!
//! Alerts fire while the remaining fuel is within [end, start) hours and
//! repeat every `repeat` hours. Applies globally to all structures.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fuel_alert_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Start of the alert window, hours before fuel expires. Must be > end.
    pub start: i32,
    /// End of the alert window, hours before fuel expires.
    pub end: i32,
    /// Repeat interval in hours; 0 means a single alert per window.
    pub repeat: i32,
    /// Ping override for alerts from this config: none, here or everyone.
    pub channel_ping_type: String,
    /// Embed color override, None keeps the renderer's default.
    pub color: Option<i32>,
    pub is_enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fuel_alert::Entity")]
    FuelAlert,
}

impl Related<super::fuel_alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FuelAlert.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
