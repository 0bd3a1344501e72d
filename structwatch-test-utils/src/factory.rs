//! Row factories for integration tests.
//!
//! Each function inserts one row with sensible defaults and returns the
//! stored model. Tests override what they care about by editing the
//! returned model or by using the `*_with` variants.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::{constant::TEST_TOKEN, error::TestError};

/// Insert an active owner included in the service status.
pub async fn owner(
    db: &DatabaseConnection,
    corporation_id: i64,
    corporation_name: &str,
) -> Result<entity::owner::Model, TestError> {
    let now = Utc::now().naive_utc();

    let owner = entity::owner::ActiveModel {
        corporation_id: Set(corporation_id),
        corporation_name: Set(corporation_name.to_string()),
        is_active: Set(true),
        is_included_in_service_status: Set(true),
        has_default_pings_enabled: Set(true),
        is_up: Set(None),
        structures_last_update_at: Set(None),
        notifications_last_update_at: Set(None),
        assets_last_update_at: Set(None),
        forwarding_last_update_at: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(owner)
}

/// Insert a valid credentialed character for an owner.
pub async fn character(
    db: &DatabaseConnection,
    owner_id: i32,
    character_id: i64,
    character_name: &str,
) -> Result<entity::owner_character::Model, TestError> {
    let now = Utc::now().naive_utc();

    let character = entity::owner_character::ActiveModel {
        owner_id: Set(owner_id),
        character_id: Set(character_id),
        character_name: Set(character_name.to_string()),
        token: Set(TEST_TOKEN.to_string()),
        is_valid: Set(true),
        structures_last_used_at: Set(None),
        notifications_last_used_at: Set(None),
        assets_last_used_at: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(character)
}

/// Insert a fueled upwell structure in a highsec system.
pub async fn structure(
    db: &DatabaseConnection,
    owner_id: i32,
    structure_id: i64,
    name: &str,
) -> Result<entity::structure::Model, TestError> {
    let now = Utc::now().naive_utc();

    let structure = entity::structure::ActiveModel {
        id: Set(structure_id),
        owner_id: Set(owner_id),
        name: Set(name.to_string()),
        eve_type_id: Set(35832),
        type_name: Set("Astrahus".to_string()),
        solar_system_id: Set(30000142),
        solar_system_name: Set("Jita".to_string()),
        solar_system_security: Set(0.9),
        category: Set("upwell".to_string()),
        state: Set("shield_vulnerable".to_string()),
        fuel_expires_at: Set(Some(now + Duration::days(7))),
        last_online_at: Set(Some(now)),
        state_timer_start: Set(None),
        state_timer_end: Set(None),
        unanchors_at: Set(None),
        reinforce_hour: Set(Some(12)),
        created_at: Set(now),
        last_updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(structure)
}

/// Insert an active webhook pointed at the given URL with the given
/// enabled notification types.
pub async fn webhook(
    db: &DatabaseConnection,
    name: &str,
    url: &str,
    notification_types: &[&str],
) -> Result<entity::webhook::Model, TestError> {
    let types = serde_json::json!(notification_types);

    let webhook = entity::webhook::ActiveModel {
        name: Set(name.to_string()),
        url: Set(url.to_string()),
        notification_types: Set(types),
        is_active: Set(true),
        is_default: Set(false),
        has_default_pings_enabled: Set(true),
        ping_group: Set(None),
        language_code: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(webhook)
}

/// Assign a webhook to an owner.
pub async fn owner_webhook(
    db: &DatabaseConnection,
    owner_id: i32,
    webhook_id: i32,
) -> Result<entity::owner_webhook::Model, TestError> {
    let link = entity::owner_webhook::ActiveModel {
        owner_id: Set(owner_id),
        webhook_id: Set(webhook_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(link)
}

/// Assign a webhook to a single structure, overriding the owner's set.
pub async fn structure_webhook(
    db: &DatabaseConnection,
    structure_id: i64,
    webhook_id: i32,
) -> Result<entity::structure_webhook::Model, TestError> {
    let link = entity::structure_webhook::ActiveModel {
        structure_id: Set(structure_id),
        webhook_id: Set(webhook_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(link)
}

/// Insert an unsent notification with the given type and payload.
pub async fn notification(
    db: &DatabaseConnection,
    owner_id: i32,
    notification_id: i64,
    notif_type: &str,
    text: Option<&str>,
) -> Result<entity::notification::Model, TestError> {
    let now = Utc::now().naive_utc();

    let notification = entity::notification::ActiveModel {
        owner_id: Set(owner_id),
        notification_id: Set(notification_id),
        sender_id: Set(Some(1000127)),
        notif_type: Set(notif_type.to_string()),
        text: Set(text.map(|t| t.to_string())),
        timestamp: Set(now),
        is_sent: Set(false),
        is_timer_added: Set(false),
        created_at: Set(now),
        last_updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(notification)
}

/// Insert an enabled fuel alert window config.
pub async fn fuel_alert_config(
    db: &DatabaseConnection,
    start: i32,
    end: i32,
    repeat: i32,
) -> Result<entity::fuel_alert_config::Model, TestError> {
    let config = entity::fuel_alert_config::ActiveModel {
        start: Set(start),
        end: Set(end),
        repeat: Set(repeat),
        channel_ping_type: Set("here".to_string()),
        color: Set(None),
        is_enabled: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(config)
}

/// Insert an enabled jump gate fuel threshold config.
pub async fn jump_fuel_alert_config(
    db: &DatabaseConnection,
    threshold: i32,
) -> Result<entity::jump_fuel_alert_config::Model, TestError> {
    let config = entity::jump_fuel_alert_config::ActiveModel {
        threshold: Set(threshold),
        channel_ping_type: Set("here".to_string()),
        color: Set(None),
        is_enabled: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(config)
}

/// Insert one asset row at a location.
pub async fn asset(
    db: &DatabaseConnection,
    owner_id: i32,
    item_id: i64,
    eve_type_id: i64,
    location_id: i64,
    quantity: i64,
) -> Result<entity::owner_asset::Model, TestError> {
    let now = Utc::now().naive_utc();

    let asset = entity::owner_asset::ActiveModel {
        item_id: Set(item_id),
        owner_id: Set(owner_id),
        eve_type_id: Set(eve_type_id),
        location_id: Set(location_id),
        location_flag: Set("StructureFuel".to_string()),
        quantity: Set(quantity),
        last_updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(asset)
}
