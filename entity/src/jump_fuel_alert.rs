//! Marker recording that a jump fuel alert was emitted for a jump gate.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jump_fuel_alert")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub structure_id: i64,
    pub config_id: i32,
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
        belongs_to = "super::jump_fuel_alert_config::Entity",
        from = "Column::ConfigId",
        to = "super::jump_fuel_alert_config::Column::Id"
    )]
    JumpFuelAlertConfig,
}

impl Related<super::structure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Structure.def()
    }
}

impl Related<super::jump_fuel_alert_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JumpFuelAlertConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
