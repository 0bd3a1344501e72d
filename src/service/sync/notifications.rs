//! The notification fetch cycle.
//!
//! ESI caches the notification endpoint per character for ten minutes, so
//! the cycle rotates through the owner's credentials to subdivide that
//! window. Fetched notifications are de-duplicated on the game-assigned ID
//! and stored unsent.

use chrono::Utc;
use sea_orm::ActiveValue;

use crate::{
    data::{
        notification::NotificationRepository,
        owner::{OwnerRepository, SyncCycle},
        webhook::WebhookRepository,
    },
    error::Error,
    model::app::AppState,
    service::sync::with_esi_retries,
};

/// Fetch and store new notifications for one owner.
///
/// Returns the IDs of webhooks that now have pending messages, so the
/// caller can queue forwarding passes for them.
pub async fn fetch_notifications(state: &AppState, owner_id: i32) -> Result<Vec<i32>, Error> {
    let owner_repo = OwnerRepository::new(&state.db);
    let Some(owner) = owner_repo.find_by_id(owner_id).await? else {
        tracing::warn!("Notification sync requested for unknown owner {owner_id}");
        return Ok(Vec::new());
    };
    if !owner.is_active {
        return Ok(Vec::new());
    }

    // Owners onboarded without any webhook assignment pick up the default
    // webhooks on their first cycle.
    let webhook_repo = WebhookRepository::new(&state.db);
    if webhook_repo.get_for_owner(owner.id).await?.is_empty() {
        webhook_repo.assign_defaults(owner.id).await?;
    }

    let fetched = loop {
        let Some(character) = owner_repo
            .next_character(owner.id, SyncCycle::Notifications)
            .await?
        else {
            tracing::error!(
                "Owner {} has no valid credentials left, deactivating",
                owner.corporation_name
            );
            owner_repo.deactivate(owner.id).await?;
            return Ok(Vec::new());
        };

        let result = with_esi_retries(&state.settings, || {
            state
                .esi_client
                .character_notifications(character.character_id, &character.token)
        })
        .await;

        match result {
            Ok(fetched) => break fetched,
            Err(Error::EsiError(err)) if err.is_unauthorized() => {
                tracing::warn!(
                    "Credential for character {} is no longer valid: {err}",
                    character.character_name
                );
                owner_repo.invalidate_character(character.id).await?;
            }
            Err(err) => return Err(err),
        }
    };

    let notification_repo = NotificationRepository::new(&state.db);
    let known = notification_repo.existing_ids(owner.id).await?;

    let now = Utc::now().naive_utc();
    let new_rows: Vec<entity::notification::ActiveModel> = fetched
        .iter()
        .filter(|notification| !known.contains(&notification.notification_id))
        .map(|notification| entity::notification::ActiveModel {
            id: ActiveValue::NotSet,
            owner_id: ActiveValue::Set(owner.id),
            notification_id: ActiveValue::Set(notification.notification_id),
            sender_id: ActiveValue::Set(notification.sender_id),
            notif_type: ActiveValue::Set(notification.notif_type.clone()),
            text: ActiveValue::Set(notification.text.clone()),
            timestamp: ActiveValue::Set(notification.timestamp.naive_utc()),
            is_sent: ActiveValue::Set(false),
            is_timer_added: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            last_updated_at: ActiveValue::Set(now),
        })
        .collect();

    let new_count = new_rows.len();
    notification_repo.insert_many(new_rows).await?;

    owner_repo
        .update_liveness(owner.id, SyncCycle::Notifications)
        .await?;

    if new_count > 0 {
        tracing::info!(
            "Stored {new_count} new notification(s) for owner {}",
            owner.corporation_name
        );
    }

    let webhooks = webhook_repo.get_for_owner(owner.id).await?;
    Ok(webhooks.into_iter().map(|webhook| webhook.id).collect())
}
