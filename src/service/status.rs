//! Owner and service health evaluation.
//!
//! An owner is healthy while its structure and notification liveness
//! timestamps are within their grace periods and at least one credential is
//! valid. The overall probe status is the AND over every active owner that
//! is included in service status. Up/down notices are edge triggered: one
//! notice per transition, recorded on the owner row.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    config::AppSettings,
    data::owner::OwnerRepository,
    error::Error,
    model::{
        api::{OwnerStatusDto, ServiceStatusDto},
        app::AppState,
        message::{Color, DiscordMessage, Embed},
    },
    service::webhook::WebhookDispatcher,
};

fn within_grace(
    last: Option<NaiveDateTime>,
    grace: std::time::Duration,
    now: DateTime<Utc>,
) -> bool {
    match last {
        Some(last) => {
            let age = now.naive_utc() - last;
            age.num_seconds() >= 0 && age.num_seconds() as u64 <= grace.as_secs()
        }
        None => false,
    }
}

/// Evaluate one owner's health from its liveness timestamps.
pub fn evaluate_owner(
    owner: &entity::owner::Model,
    has_valid_character: bool,
    settings: &AppSettings,
    now: DateTime<Utc>,
) -> OwnerStatusDto {
    let is_structure_sync_ok = within_grace(
        owner.structures_last_update_at,
        settings.structure_sync_grace,
        now,
    );
    let is_notification_sync_ok = within_grace(
        owner.notifications_last_update_at,
        settings.notification_sync_grace,
        now,
    );
    let is_forwarding_sync_ok = within_grace(
        owner.forwarding_last_update_at,
        settings.forwarding_sync_grace,
        now,
    );

    OwnerStatusDto {
        corporation_id: owner.corporation_id,
        corporation_name: owner.corporation_name.clone(),
        is_structure_sync_ok,
        is_notification_sync_ok,
        is_forwarding_sync_ok,
        has_valid_character,
        is_up: is_structure_sync_ok && is_notification_sync_ok && has_valid_character,
    }
}

/// Compute the full service status for the HTTP surface.
pub async fn service_status(state: &AppState) -> Result<ServiceStatusDto, Error> {
    let owner_repo = OwnerRepository::new(&state.db);
    let now = Utc::now();

    let mut owners = Vec::new();
    let mut is_up = true;

    for owner in owner_repo.get_active().await? {
        let has_valid_character = !owner_repo.valid_characters(owner.id).await?.is_empty();
        let status = evaluate_owner(&owner, has_valid_character, &state.settings, now);
        if owner.is_included_in_service_status && !status.is_up {
            is_up = false;
        }
        owners.push(status);
    }

    Ok(ServiceStatusDto { is_up, owners })
}

/// Recompute every owner's health and emit edge-triggered notices.
///
/// The previous state is stored on the owner row, so exactly one notice is
/// sent per healthy/unhealthy transition regardless of how often this runs.
pub async fn check_service_status(
    state: &AppState,
    dispatcher: &WebhookDispatcher,
    admin_webhook_url: Option<&str>,
) -> Result<(), Error> {
    let owner_repo = OwnerRepository::new(&state.db);
    let now = Utc::now();

    for owner in owner_repo.get_active().await? {
        let has_valid_character = !owner_repo.valid_characters(owner.id).await?.is_empty();
        let status = evaluate_owner(&owner, has_valid_character, &state.settings, now);

        match owner.is_up {
            Some(previous) if previous == status.is_up => {}
            previous => {
                owner_repo.set_is_up(owner.id, status.is_up).await?;
                // First observation is stored silently, transitions notify.
                if previous.is_some() {
                    notify_transition(state, dispatcher, admin_webhook_url, &owner, &status)
                        .await;
                }
            }
        }
    }

    Ok(())
}

async fn notify_transition(
    state: &AppState,
    dispatcher: &WebhookDispatcher,
    admin_webhook_url: Option<&str>,
    owner: &entity::owner::Model,
    status: &OwnerStatusDto,
) {
    if status.is_up {
        tracing::info!("Owner {} has recovered", owner.corporation_name);
    } else {
        tracing::error!(
            "Owner {} is down (structures ok: {}, notifications ok: {}, valid credential: {})",
            owner.corporation_name,
            status.is_structure_sync_ok,
            status.is_notification_sync_ok,
            status.has_valid_character
        );
    }

    let Some(url) = admin_webhook_url else {
        return;
    };

    let (title, description, color) = if status.is_up {
        (
            "Owner recovered".to_string(),
            format!("Syncing for {} is working again.", owner.corporation_name),
            Color::Success,
        )
    } else {
        (
            "Owner down".to_string(),
            format!(
                "Syncing for {} has stopped working. Structures ok: {}, notifications ok: {}, valid credential: {}.",
                owner.corporation_name,
                status.is_structure_sync_ok,
                status.is_notification_sync_ok,
                status.has_valid_character
            ),
            Color::Danger,
        )
    };

    let message = DiscordMessage {
        content: None,
        username: Some("Structures".to_string()),
        avatar_url: None,
        embeds: vec![Embed {
            title: Some(title),
            description: Some(description),
            color: Some(color.value()),
            timestamp: Some(Utc::now()),
        }],
    };

    // A failed admin notice must not fail the status check; the transition
    // is already recorded and will not re-notify.
    if let Err(err) = dispatcher
        .send(
            url,
            &message,
            state.settings.notification_max_retries,
            state.settings.notification_wait,
        )
        .await
    {
        tracing::error!("Failed to deliver admin status notice: {err}");
    }
}
