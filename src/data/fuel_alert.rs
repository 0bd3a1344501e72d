use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct FuelAlertRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FuelAlertRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_enabled_configs(&self) -> Result<Vec<entity::fuel_alert_config::Model>, DbErr> {
        entity::prelude::FuelAlertConfig::find()
            .filter(entity::fuel_alert_config::Column::IsEnabled.eq(true))
            .all(self.db)
            .await
    }

    /// Record that an alert at `hours` is due for this (structure, config).
    /// Returns true when the marker was newly created, meaning the alert
    /// has not been sent yet for this interval.
    pub async fn mark_alerted(
        &self,
        structure_id: i64,
        config_id: i32,
        hours: i32,
    ) -> Result<bool, DbErr> {
        let existing = entity::prelude::FuelAlert::find()
            .filter(entity::fuel_alert::Column::StructureId.eq(structure_id))
            .filter(entity::fuel_alert::Column::ConfigId.eq(config_id))
            .filter(entity::fuel_alert::Column::Hours.eq(hours))
            .one(self.db)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let row = entity::fuel_alert::ActiveModel {
            id: ActiveValue::NotSet,
            structure_id: ActiveValue::Set(structure_id),
            config_id: ActiveValue::Set(config_id),
            hours: ActiveValue::Set(hours),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };
        entity::prelude::FuelAlert::insert(row).exec(self.db).await?;
        Ok(true)
    }

    /// Drop markers for a structure, used after a refuel so alerts can fire
    /// again on the next depletion.
    pub async fn clear_for_structure(&self, structure_id: i64) -> Result<(), DbErr> {
        entity::prelude::FuelAlert::delete_many()
            .filter(entity::fuel_alert::Column::StructureId.eq(structure_id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn get_enabled_jump_configs(
        &self,
    ) -> Result<Vec<entity::jump_fuel_alert_config::Model>, DbErr> {
        entity::prelude::JumpFuelAlertConfig::find()
            .filter(entity::jump_fuel_alert_config::Column::IsEnabled.eq(true))
            .all(self.db)
            .await
    }

    /// Record a jump fuel alert for this (structure, config). Returns true
    /// when newly created.
    pub async fn mark_jump_alerted(
        &self,
        structure_id: i64,
        config_id: i32,
    ) -> Result<bool, DbErr> {
        let existing = entity::prelude::JumpFuelAlert::find()
            .filter(entity::jump_fuel_alert::Column::StructureId.eq(structure_id))
            .filter(entity::jump_fuel_alert::Column::ConfigId.eq(config_id))
            .one(self.db)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let row = entity::jump_fuel_alert::ActiveModel {
            id: ActiveValue::NotSet,
            structure_id: ActiveValue::Set(structure_id),
            config_id: ActiveValue::Set(config_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };
        entity::prelude::JumpFuelAlert::insert(row).exec(self.db).await?;
        Ok(true)
    }

    /// Drop jump fuel markers once the quantity is back above threshold.
    pub async fn clear_jump_for_structure(
        &self,
        structure_id: i64,
        config_id: i32,
    ) -> Result<(), DbErr> {
        entity::prelude::JumpFuelAlert::delete_many()
            .filter(entity::jump_fuel_alert::Column::StructureId.eq(structure_id))
            .filter(entity::jump_fuel_alert::Column::ConfigId.eq(config_id))
            .exec(self.db)
            .await?;
        Ok(())
    }
}
