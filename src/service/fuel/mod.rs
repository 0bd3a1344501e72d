//! Fuel alert generation.
//!
//! Structure fuel alerts fire while the remaining fuel is inside a config's
//! [end, start) window, repeating on the configured interval. Jump gate fuel
//! alerts fire once the Liquid Ozone quantity in the gate drops below a
//! configured threshold. Both are idempotent: a marker row per occurrence
//! prevents duplicate emission across repeated passes.

use chrono::{NaiveDateTime, Utc};

use crate::{
    constant::{EVE_TYPE_ID_JUMP_GATE, EVE_TYPE_ID_LIQUID_OZONE},
    data::{
        asset::AssetRepository, fuel_alert::FuelAlertRepository,
        notification::NotificationRepository, structure::StructureRepository,
    },
    error::Error,
    model::app::AppState,
};

/// Hours of fuel remaining, negative once expired.
pub fn hours_left(fuel_expires_at: NaiveDateTime, now: NaiveDateTime) -> f64 {
    (fuel_expires_at - now).num_seconds() as f64 / 3600.0
}

/// The threshold hour the latest due alert of this config corresponds to,
/// or None when the remaining fuel is outside the config's window.
///
/// With start=48, end=0, repeat=12 and 30 hours left, alerts were due at 48
/// and 36 hours, so this returns 36.
pub fn due_hours(config: &entity::fuel_alert_config::Model, hours_left: f64) -> Option<i32> {
    if hours_left >= config.start as f64 || hours_left < config.end as f64 {
        return None;
    }
    if config.repeat <= 0 {
        return Some(config.start);
    }
    let intervals = ((config.start as f64 - hours_left) / config.repeat as f64).floor() as i32;
    Some(config.start - intervals * config.repeat)
}

/// Evaluate every enabled fuel alert config against current structure and
/// asset state, emitting synthetic notifications for newly due alerts.
pub async fn check_fuel_alerts(state: &AppState) -> Result<(), Error> {
    let structure_repo = StructureRepository::new(&state.db);
    let fuel_alert_repo = FuelAlertRepository::new(&state.db);
    let notification_repo = NotificationRepository::new(&state.db);
    let asset_repo = AssetRepository::new(&state.db);

    let structures = structure_repo.get_all().await?;
    let configs = fuel_alert_repo.get_enabled_configs().await?;
    let jump_configs = fuel_alert_repo.get_enabled_jump_configs().await?;
    let now = Utc::now().naive_utc();

    for structure in &structures {
        if let Some(fuel_expires_at) = structure.fuel_expires_at {
            let hours = hours_left(fuel_expires_at, now);
            for config in &configs {
                let Some(due) = due_hours(config, hours) else {
                    continue;
                };
                if fuel_alert_repo
                    .mark_alerted(structure.id, config.id, due)
                    .await?
                {
                    let notif_type = if structure.category == "starbase" {
                        "TowerResourceAlertMsg"
                    } else {
                        "StructureFuelAlert"
                    };
                    notification_repo
                        .create_generated(
                            structure.owner_id,
                            notif_type,
                            Some(format!(
                                "structureID: {}\nconfigID: {}\nhoursLeft: {}\n",
                                structure.id,
                                config.id,
                                hours.floor() as i64
                            )),
                        )
                        .await?;
                    tracing::info!(
                        "Fuel alert ({due}h threshold) for structure {}",
                        structure.name
                    );
                }
            }
        }

        if structure.eve_type_id == EVE_TYPE_ID_JUMP_GATE {
            let quantity = asset_repo
                .quantity_at(structure.id, EVE_TYPE_ID_LIQUID_OZONE)
                .await?;
            for config in &jump_configs {
                if quantity < config.threshold as i64 {
                    if fuel_alert_repo
                        .mark_jump_alerted(structure.id, config.id)
                        .await?
                    {
                        notification_repo
                            .create_generated(
                                structure.owner_id,
                                "StructureJumpFuelAlert",
                                Some(format!(
                                    "structureID: {}\nconfigID: {}\nquantity: {quantity}\n",
                                    structure.id, config.id
                                )),
                            )
                            .await?;
                        tracing::info!(
                            "Jump fuel alert ({} units) for structure {}",
                            quantity,
                            structure.name
                        );
                    }
                } else {
                    // Back above threshold: reset so the next depletion
                    // alerts again.
                    fuel_alert_repo
                        .clear_jump_for_structure(structure.id, config.id)
                        .await?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: i32, end: i32, repeat: i32) -> entity::fuel_alert_config::Model {
        entity::fuel_alert_config::Model {
            id: 1,
            start,
            end,
            repeat,
            channel_ping_type: "here".to_string(),
            color: None,
            is_enabled: true,
        }
    }

    #[test]
    fn test_outside_window_is_not_due() {
        let cfg = config(48, 0, 12);
        assert_eq!(due_hours(&cfg, 48.0), None);
        assert_eq!(due_hours(&cfg, 100.0), None);
        assert_eq!(due_hours(&cfg, -1.0), None);
    }

    #[test]
    fn test_due_hours_steps_down_by_repeat() {
        let cfg = config(48, 0, 12);
        assert_eq!(due_hours(&cfg, 47.9), Some(48));
        assert_eq!(due_hours(&cfg, 36.5), Some(48));
        assert_eq!(due_hours(&cfg, 36.0), Some(36));
        assert_eq!(due_hours(&cfg, 30.0), Some(36));
        assert_eq!(due_hours(&cfg, 5.0), Some(12));
        assert_eq!(due_hours(&cfg, 0.0), Some(0));
    }

    #[test]
    fn test_zero_repeat_yields_single_alert() {
        let cfg = config(24, 0, 0);
        assert_eq!(due_hours(&cfg, 20.0), Some(24));
        assert_eq!(due_hours(&cfg, 1.0), Some(24));
    }

    #[test]
    fn test_window_end_excludes_alerts() {
        let cfg = config(48, 24, 12);
        assert_eq!(due_hours(&cfg, 23.0), None);
        assert_eq!(due_hours(&cfg, 24.0), Some(24));
    }

    #[test]
    fn test_hours_left() {
        let now = Utc::now().naive_utc();
        let expires = now + chrono::Duration::hours(6);
        assert!((hours_left(expires, now) - 6.0).abs() < 0.01);
        let expired = now - chrono::Duration::hours(3);
        assert!((hours_left(expired, now) + 3.0).abs() < 0.01);
    }
}
