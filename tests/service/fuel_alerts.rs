//! Fuel alert generation and idempotence.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use structwatch::service::fuel::check_fuel_alerts;
use structwatch_test_utils::prelude::*;

use crate::util;

#[tokio::test]
async fn test_fuel_alert_fires_once_per_window_step() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let structure = factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;
    let mut structure = structure.into_active_model();
    structure.fuel_expires_at = Set(Some(Utc::now().naive_utc() + Duration::hours(10)));
    structure.update(&setup.db).await?;

    factory::fuel_alert_config(&setup.db, 48, 0, 12).await?;

    check_fuel_alerts(&state).await.unwrap();
    // A second run within the same step must not alert again.
    check_fuel_alerts(&state).await.unwrap();

    let alerts = entity::prelude::Notification::find()
        .filter(entity::notification::Column::NotifType.eq("StructureFuelAlert"))
        .all(&setup.db)
        .await?;
    assert_eq!(alerts.len(), 1);
    // Generated notifications use the reserved negative ID space.
    assert!(alerts[0].notification_id <= -1_000_000);
    assert!(!alerts[0].is_sent);

    Ok(())
}

#[tokio::test]
async fn test_structure_outside_window_does_not_alert() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    // Factory default leaves seven days of fuel, outside a 48 hour window.
    factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;
    factory::fuel_alert_config(&setup.db, 48, 0, 12).await?;

    check_fuel_alerts(&state).await.unwrap();

    let alerts = entity::prelude::Notification::find().all(&setup.db).await?;
    assert!(alerts.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_jump_gate_alert_fires_below_threshold() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let structure = factory::structure(&setup.db, owner.id, 42, "Wayne Gate").await?;
    let mut structure = structure.into_active_model();
    structure.eve_type_id = Set(35841);
    structure.type_name = Set("Ansiblex Jump Gate".to_string());
    structure.update(&setup.db).await?;

    // 500 units of Liquid Ozone stored in the gate, threshold is 1000.
    factory::asset(&setup.db, owner.id, 1, 16273, 42, 500).await?;
    factory::jump_fuel_alert_config(&setup.db, 1000).await?;

    check_fuel_alerts(&state).await.unwrap();
    check_fuel_alerts(&state).await.unwrap();

    let alerts = entity::prelude::Notification::find()
        .filter(entity::notification::Column::NotifType.eq("StructureJumpFuelAlert"))
        .all(&setup.db)
        .await?;
    assert_eq!(alerts.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_jump_gate_above_threshold_does_not_alert() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let structure = factory::structure(&setup.db, owner.id, 42, "Wayne Gate").await?;
    let mut structure = structure.into_active_model();
    structure.eve_type_id = Set(35841);
    structure.update(&setup.db).await?;

    factory::asset(&setup.db, owner.id, 1, 16273, 42, 5000).await?;
    factory::jump_fuel_alert_config(&setup.db, 1000).await?;

    check_fuel_alerts(&state).await.unwrap();

    let alerts = entity::prelude::Notification::find()
        .filter(entity::notification::Column::NotifType.eq("StructureJumpFuelAlert"))
        .all(&setup.db)
        .await?;
    assert!(alerts.is_empty());

    Ok(())
}
