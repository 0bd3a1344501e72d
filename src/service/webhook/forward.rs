//! The per-webhook forwarding pass.
//!
//! Each pass drains one webhook's pending notifications oldest first. The
//! worker pool keeps passes for the same webhook mutually exclusive, which
//! makes delivery single-consumer per webhook and preserves chronological
//! order even across retries.

use chrono::{Duration, Utc};
use sea_orm::EntityTrait;

use crate::{
    data::{
        notification::NotificationRepository, owner::OwnerRepository,
        structure::StructureRepository,
        webhook::{enabled_types, WebhookRepository},
    },
    error::Error,
    model::{app::AppState, message::PingType},
    service::{
        notification::{embed, payload, NotificationType},
        webhook::WebhookDispatcher,
    },
};

/// Deliver this webhook's pending messages, oldest first per owner.
///
/// Each pass posts only to its own webhook and records the delivery, so
/// overlapping passes for different webhooks never post the same message
/// to the same endpoint twice. A notification eligible for several webhooks
/// is marked sent once every one of them has a delivery record. A delivery
/// failure stops the owner's queue for this pass; the notification stays
/// unsent and the next pass retries it first.
pub async fn send_pending_messages(
    state: &AppState,
    dispatcher: &WebhookDispatcher,
    webhook_id: i32,
) -> Result<(), Error> {
    let webhook_repo = WebhookRepository::new(&state.db);
    let Some(webhook) = webhook_repo.find_by_id(webhook_id).await? else {
        tracing::warn!("Forwarding pass for unknown webhook {webhook_id}");
        return Ok(());
    };
    if !webhook.is_active {
        return Ok(());
    }

    let owner_repo = OwnerRepository::new(&state.db);
    let notification_repo = NotificationRepository::new(&state.db);
    let stale_cutoff =
        (Utc::now() - Duration::hours(state.settings.hours_until_stale)).naive_utc();

    for owner_id in webhook_repo.owner_ids(webhook_id).await? {
        let Some(owner) = owner_repo.find_by_id(owner_id).await? else {
            continue;
        };
        if !owner.is_active {
            continue;
        }

        let pending = notification_repo
            .pending_for_owner(owner.id, stale_cutoff)
            .await?;
        let mut delivered = 0usize;
        let mut stopped = false;

        for notification in pending {
            // Another pass may have claimed this row in the meantime.
            let Some(fresh) = entity::prelude::Notification::find_by_id(notification.id)
                .one(&state.db)
                .await?
            else {
                continue;
            };
            if fresh.is_sent {
                continue;
            }

            let notif_type = NotificationType::from_type_string(&fresh.notif_type);
            let structure = resolve_structure(state, &fresh).await?;

            let mut targets = match &structure {
                Some(structure) => {
                    let overrides = webhook_repo.get_for_structure(structure.id).await?;
                    if overrides.is_empty() {
                        webhook_repo.get_for_owner(owner.id).await?
                    } else {
                        overrides
                    }
                }
                None => webhook_repo.get_for_owner(owner.id).await?,
            };
            targets.retain(|target| {
                enabled_types(target)
                    .iter()
                    .any(|enabled| enabled == notif_type.as_str())
            });

            if !targets.iter().any(|target| target.id == webhook_id) {
                continue;
            }

            let mut delivered_to = notification_repo.delivered_webhook_ids(fresh.id).await?;

            // Each pass posts only to its own webhook; other passes consult
            // the delivery ledger, so a notification eligible for several
            // webhooks reaches each endpoint exactly once.
            if !delivered_to.contains(&webhook_id) {
                let (color_override, ping_override) =
                    alert_overrides(state, &notif_type, fresh.text.as_deref()).await?;
                let rendered = embed::render_embed(&embed::RenderInput {
                    notification: &fresh,
                    structure: structure.as_ref(),
                });
                let message = embed::build_message(
                    rendered,
                    &notif_type,
                    &webhook,
                    owner.has_default_pings_enabled,
                    color_override,
                    ping_override,
                );
                if let Err(err) = dispatcher
                    .send(
                        &webhook.url,
                        &message,
                        state.settings.notification_max_retries,
                        state.settings.notification_wait,
                    )
                    .await
                {
                    tracing::warn!(
                        "Delivery of notification {} to webhook {} failed: {err}",
                        fresh.notification_id,
                        webhook.name
                    );
                    // Preserve chronological order: do not deliver newer
                    // notifications past a failed one.
                    stopped = true;
                    break;
                }
                notification_repo.record_delivery(fresh.id, webhook_id).await?;
                delivered_to.insert(webhook_id);
                delivered += 1;
            }

            // Done once every eligible webhook has a delivery row; whichever
            // pass completes the set marks it.
            if targets.iter().all(|target| delivered_to.contains(&target.id)) {
                notification_repo.mark_sent(fresh.id).await?;
            }
        }

        if delivered > 0 {
            tracing::info!(
                "Forwarded {delivered} notification(s) for owner {}",
                owner.corporation_name
            );
        }
        if !stopped {
            owner_repo.update_forwarding_liveness(owner.id).await?;
        }
    }

    Ok(())
}

/// Resolve the structure a notification refers to via its payload.
async fn resolve_structure(
    state: &AppState,
    notification: &entity::notification::Model,
) -> Result<Option<entity::structure::Model>, Error> {
    let Some(text) = notification.text.as_deref() else {
        return Ok(None);
    };
    let structure_id = payload::field_i64(text, "structureID")
        .or_else(|| payload::field_i64(text, "openRequestID"));
    let Some(structure_id) = structure_id else {
        return Ok(None);
    };
    Ok(StructureRepository::new(&state.db)
        .find_by_id(structure_id)
        .await?)
}

/// Color and ping overrides for locally generated alert notifications,
/// taken from the config that produced them.
async fn alert_overrides(
    state: &AppState,
    notif_type: &NotificationType,
    text: Option<&str>,
) -> Result<(Option<i32>, Option<PingType>), Error> {
    let Some(text) = text else {
        return Ok((None, None));
    };
    let Some(config_id) = payload::field_i64(text, "configID") else {
        return Ok((None, None));
    };
    let config_id = config_id as i32;

    match notif_type {
        NotificationType::StructureFuelAlert | NotificationType::TowerResourceAlertMsg => {
            let config = entity::prelude::FuelAlertConfig::find_by_id(config_id)
                .one(&state.db)
                .await?;
            Ok(match config {
                Some(config) => (
                    config.color,
                    Some(PingType::from_config_value(&config.channel_ping_type)),
                ),
                None => (None, None),
            })
        }
        NotificationType::StructureJumpFuelAlert => {
            let config = entity::prelude::JumpFuelAlertConfig::find_by_id(config_id)
                .one(&state.db)
                .await?;
            Ok(match config {
                Some(config) => (
                    config.color,
                    Some(PingType::from_config_value(&config.channel_ping_type)),
                ),
                None => (None, None),
            })
        }
        _ => Ok((None, None)),
    }
}
