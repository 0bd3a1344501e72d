//! Threshold rule for jump gate fuel alerts, in units of Liquid Ozone.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jump_fuel_alert_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Alert once the fuel quantity drops below this many units.
    pub threshold: i32,
    pub channel_ping_type: String,
    pub color: Option<i32>,
    pub is_enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::jump_fuel_alert::Entity")]
    JumpFuelAlert,
}

impl Related<super::jump_fuel_alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JumpFuelAlert.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
