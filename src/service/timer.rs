//! Timer creation for qualifying notifications.
//!
//! Reinforcement and extraction notifications carry an explicit or
//! computable end time. Qualifying notifications are turned into timer
//! records and handed to a [`TimerSink`], with anchoring timers excluded in
//! null security space.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    data::{notification::NotificationRepository, structure::StructureRepository},
    error::Error,
    model::app::AppState,
    service::notification::{payload, NotificationType},
};

/// A timer record emitted to the external timer-tracking component.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    pub structure_name: String,
    pub solar_system_name: String,
    pub timer_type: String,
    pub date: DateTime<Utc>,
    pub is_corp_restricted: bool,
}

#[async_trait]
pub trait TimerSink: Send + Sync {
    async fn add_timer(&self, timer: &Timer) -> Result<(), Error>;
}

/// Sink POSTing timers to a companion timerboard service.
pub struct HttpTimerSink {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTimerSink {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InternalError(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TimerSink for HttpTimerSink {
    async fn add_timer(&self, timer: &Timer) -> Result<(), Error> {
        let url = format!("{}/timers/", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "structure_name": timer.structure_name,
                "solar_system": timer.solar_system_name,
                "timer_type": timer.timer_type,
                "date": timer.date,
                "corp_restricted": timer.is_corp_restricted,
            }))
            .send()
            .await
            .map_err(|e| Error::InternalError(format!("timer submission failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::InternalError(format!(
                "timerboard returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Create timers for an owner's qualifying unprocessed notifications.
pub async fn process_timers(
    state: &AppState,
    sink: &dyn TimerSink,
    owner_id: i32,
) -> Result<(), Error> {
    if !state.settings.add_timers {
        return Ok(());
    }

    let notification_repo = NotificationRepository::new(&state.db);
    let structure_repo = StructureRepository::new(&state.db);
    let stale_cutoff =
        (Utc::now() - Duration::hours(state.settings.hours_until_stale)).naive_utc();

    for notification in notification_repo
        .pending_timers(owner_id, stale_cutoff)
        .await?
    {
        let notif_type = NotificationType::from_type_string(&notification.notif_type);
        if !notif_type.creates_timer() {
            // Mark processed so it is not reconsidered every pass.
            notification_repo.mark_timer_added(notification.id).await?;
            continue;
        }

        let structure = match notification
            .text
            .as_deref()
            .and_then(|text| payload::field_i64(text, "structureID"))
        {
            Some(structure_id) => structure_repo.find_by_id(structure_id).await?,
            None => None,
        };

        // Structures anchor instantly in null sec, so no timer exists there.
        if notif_type == NotificationType::StructureAnchoring {
            if let Some(structure) = &structure {
                if structure.solar_system_security <= 0.0 {
                    notification_repo.mark_timer_added(notification.id).await?;
                    continue;
                }
            }
        }

        let Some(date) = timer_date(&notif_type, &notification) else {
            tracing::warn!(
                "Notification {} of type {} has no usable timer date",
                notification.notification_id,
                notification.notif_type
            );
            notification_repo.mark_timer_added(notification.id).await?;
            continue;
        };

        let timer = Timer {
            structure_name: structure
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| crate::constant::STRUCTURE_NAME_PLACEHOLDER.to_string()),
            solar_system_name: structure
                .as_ref()
                .map(|s| s.solar_system_name.clone())
                .unwrap_or_default(),
            timer_type: timer_label(&notif_type).to_string(),
            date,
            is_corp_restricted: state.settings.timers_are_corp_restricted,
        };

        sink.add_timer(&timer).await?;
        notification_repo.mark_timer_added(notification.id).await?;
        tracing::info!(
            "Created {} timer for {} at {}",
            timer.timer_type,
            timer.structure_name,
            timer.date
        );
    }

    Ok(())
}

/// Derive the timer end from the notification payload.
pub fn timer_date(
    notif_type: &NotificationType,
    notification: &entity::notification::Model,
) -> Option<DateTime<Utc>> {
    let text = notification.text.as_deref().unwrap_or("");
    let received = DateTime::<Utc>::from_naive_utc_and_offset(notification.timestamp, Utc);

    match notif_type {
        // Reinforcement exit is a countdown from the notification time.
        NotificationType::StructureLostShields | NotificationType::StructureLostArmor => {
            let ticks = payload::field_i64(text, "timeLeft")?;
            Some(received + payload::ldap_duration(ticks))
        }
        NotificationType::OrbitalReinforced => {
            let value = payload::field_i64(text, "reinforceExitTime")?;
            payload::ldap_datetime(value)
        }
        NotificationType::MoonminingExtractionStarted => {
            let value = payload::field_i64(text, "readyTime")?;
            payload::ldap_datetime(value)
        }
        NotificationType::SovStructureReinforced => {
            let value = payload::field_i64(text, "decloakTime")?;
            payload::ldap_datetime(value)
        }
        // Upwell anchoring completes 24 hours after the notification.
        NotificationType::StructureAnchoring => Some(received + Duration::hours(24)),
        _ => None,
    }
}

fn timer_label(notif_type: &NotificationType) -> &'static str {
    match notif_type {
        NotificationType::StructureLostShields => "armor",
        NotificationType::StructureLostArmor => "hull",
        NotificationType::StructureAnchoring => "anchoring",
        NotificationType::OrbitalReinforced => "poco reinforcement",
        NotificationType::MoonminingExtractionStarted => "moon extraction",
        NotificationType::SovStructureReinforced => "sov reinforcement",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn notification(notif_type: &str, text: &str) -> entity::notification::Model {
        let now = Utc::now().naive_utc();
        entity::notification::Model {
            id: 1,
            owner_id: 1,
            notification_id: 100,
            sender_id: None,
            notif_type: notif_type.to_string(),
            text: Some(text.to_string()),
            timestamp: now,
            is_sent: false,
            is_timer_added: false,
            created_at: now,
            last_updated_at: now,
        }
    }

    #[test]
    fn test_lost_shields_timer_adds_time_left() {
        // 9000000000 ticks = 15 minutes
        let notif = notification("StructureLostShields", "timeLeft: 9000000000\n");
        let notif_type = NotificationType::StructureLostShields;
        let date = timer_date(&notif_type, &notif).unwrap();
        let received = DateTime::<Utc>::from_naive_utc_and_offset(notif.timestamp, Utc);
        assert_eq!(date - received, Duration::minutes(15));
    }

    #[test]
    fn test_orbital_reinforced_uses_exit_time() {
        let notif = notification("OrbitalReinforced", "reinforceExitTime: 131142378540000000\n");
        let notif_type = NotificationType::OrbitalReinforced;
        let date = timer_date(&notif_type, &notif).unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2016-07-20");
    }

    #[test]
    fn test_anchoring_timer_is_24_hours_out() {
        let notif = notification("StructureAnchoring", "structureID: 1\n");
        let notif_type = NotificationType::StructureAnchoring;
        let date = timer_date(&notif_type, &notif).unwrap();
        let received = DateTime::<Utc>::from_naive_utc_and_offset(notif.timestamp, Utc);
        assert_eq!(date - received, Duration::hours(24));
    }

    #[test]
    fn test_missing_payload_yields_no_date() {
        let notif = notification("StructureLostShields", "structureID: 1\n");
        let notif_type = NotificationType::StructureLostShields;
        assert_eq!(timer_date(&notif_type, &notif), None);
    }

    #[test]
    fn test_non_timer_types_yield_no_date() {
        let notif = notification("StructureUnderAttack", "timeLeft: 9000000000\n");
        let notif_type = NotificationType::StructureUnderAttack;
        assert_eq!(timer_date(&notif_type, &notif), None);
    }
}
