//! Renders a classified notification into a Discord message.

use chrono::{DateTime, Utc};

use crate::constant::STRUCTURE_NAME_PLACEHOLDER;
use crate::model::message::{DiscordMessage, Embed, PingType};
use crate::service::notification::{payload, NotificationType};

/// Everything the renderer needs about one notification.
pub struct RenderInput<'a> {
    pub notification: &'a entity::notification::Model,
    /// The referenced structure when it could be resolved.
    pub structure: Option<&'a entity::structure::Model>,
}

impl<'a> RenderInput<'a> {
    fn structure_name(&self) -> &str {
        match self.structure {
            Some(structure) if !structure.name.is_empty() => &structure.name,
            _ => STRUCTURE_NAME_PLACEHOLDER,
        }
    }

    fn system_name(&self) -> &str {
        match self.structure {
            Some(structure) => &structure.solar_system_name,
            None => "an unknown system",
        }
    }

    fn payload_hours(&self, key: &str) -> Option<i64> {
        self.notification
            .text
            .as_deref()
            .and_then(|text| payload::field_i64(text, key))
    }
}

/// Build the embed for a notification. Total: unknown types render with a
/// generic title so nothing is dropped.
pub fn render_embed(input: &RenderInput<'_>) -> Embed {
    let notif_type = NotificationType::from_type_string(&input.notification.notif_type);
    let name = input.structure_name();
    let system = input.system_name();

    let (title, description) = match &notif_type {
        NotificationType::StructureAnchoring => (
            "Structure anchoring".to_string(),
            format!("{name} has started anchoring in {system}."),
        ),
        NotificationType::StructureOnline => (
            "Structure online".to_string(),
            format!("{name} in {system} is now online."),
        ),
        NotificationType::StructureUnanchoring => (
            "Structure unanchoring".to_string(),
            format!("{name} in {system} has started unanchoring."),
        ),
        NotificationType::StructureUnderAttack => (
            "Structure under attack".to_string(),
            format!("{name} in {system} is under attack!"),
        ),
        NotificationType::StructureLostShields => (
            "Structure lost shields".to_string(),
            format!("{name} in {system} has lost its shields and is now reinforced."),
        ),
        NotificationType::StructureLostArmor => (
            "Structure lost armor".to_string(),
            format!("{name} in {system} has lost its armor and is now reinforced."),
        ),
        NotificationType::StructureDestroyed => (
            "Structure destroyed".to_string(),
            format!("{name} in {system} has been destroyed."),
        ),
        NotificationType::StructureFuelAlert => {
            let hours = input.payload_hours("hoursLeft");
            let detail = match hours {
                Some(hours) => format!("{name} in {system} runs out of fuel in {hours} hour(s)."),
                None => format!("{name} in {system} is running low on fuel."),
            };
            ("Structure fuel alert".to_string(), detail)
        }
        NotificationType::StructureWentLowPower => (
            "Structure went low power".to_string(),
            format!("{name} in {system} went to low power mode."),
        ),
        NotificationType::StructureWentHighPower => (
            "Structure went full power".to_string(),
            format!("{name} in {system} went to full power mode."),
        ),
        NotificationType::StructureServicesOffline => (
            "Structure services offline".to_string(),
            format!("The services of {name} in {system} are now offline."),
        ),
        NotificationType::StructuresReinforcementChanged => (
            "Reinforcement hour changed".to_string(),
            format!("The reinforcement hour of {name} has been changed."),
        ),
        NotificationType::OwnershipTransferred => (
            "Ownership transferred".to_string(),
            format!("Ownership of {name} in {system} has been transferred."),
        ),
        NotificationType::OrbitalAttacked => (
            "Customs office under attack".to_string(),
            format!("{name} in {system} is under attack!"),
        ),
        NotificationType::OrbitalReinforced => (
            "Customs office reinforced".to_string(),
            format!("{name} in {system} has been reinforced."),
        ),
        NotificationType::TowerAlertMsg => (
            "Starbase under attack".to_string(),
            format!("{name} in {system} is under attack!"),
        ),
        NotificationType::TowerResourceAlertMsg => (
            "Starbase fuel alert".to_string(),
            format!("{name} in {system} is running low on fuel."),
        ),
        NotificationType::MoonminingExtractionStarted => (
            "Moon extraction started".to_string(),
            format!("A moon extraction has started at {name} in {system}."),
        ),
        NotificationType::MoonminingExtractionFinished => (
            "Moon extraction finished".to_string(),
            format!("The moon extraction at {name} in {system} is ready to be fractured."),
        ),
        NotificationType::MoonminingExtractionCancelled => (
            "Moon extraction cancelled".to_string(),
            format!("The moon extraction at {name} in {system} has been cancelled."),
        ),
        NotificationType::MoonminingLaserFired => (
            "Moon laser fired".to_string(),
            format!("The moon chunk at {name} in {system} has been fractured."),
        ),
        NotificationType::MoonminingAutomaticFracture => (
            "Moon chunk auto-fractured".to_string(),
            format!("The moon chunk at {name} in {system} fractured automatically."),
        ),
        NotificationType::SovStructureReinforced => (
            "Sovereignty structure reinforced".to_string(),
            format!("A sovereignty structure in {system} has been reinforced."),
        ),
        NotificationType::SovStructureDestroyed => (
            "Sovereignty structure destroyed".to_string(),
            format!("A sovereignty structure in {system} has been destroyed."),
        ),
        NotificationType::SovAllClaimAcquiredMsg => (
            "Sovereignty claim acquired".to_string(),
            format!("A sovereignty claim has been acquired in {system}."),
        ),
        NotificationType::SovAllClaimLostMsg => (
            "Sovereignty claim lost".to_string(),
            format!("A sovereignty claim has been lost in {system}."),
        ),
        NotificationType::EntosisCaptureStarted => (
            "Entosis capture started".to_string(),
            format!("An entosis capture has started in {system}."),
        ),
        NotificationType::SovCommandNodeEventStarted => (
            "Command nodes decloaked".to_string(),
            format!("Command nodes for {system} have decloaked."),
        ),
        NotificationType::AllAnchoringMsg => (
            "Starbase anchoring".to_string(),
            format!("A starbase is anchoring in {system}."),
        ),
        NotificationType::StructureRefueledExtra => (
            "Structure refueled".to_string(),
            format!("{name} in {system} has been refueled."),
        ),
        NotificationType::TowerRefueledExtra => (
            "Starbase refueled".to_string(),
            format!("{name} in {system} has been refueled."),
        ),
        NotificationType::StructureJumpFuelAlert => {
            let quantity = input.payload_hours("quantity");
            let detail = match quantity {
                Some(quantity) => {
                    format!("{name} in {system} is down to {quantity} units of Liquid Ozone.")
                }
                None => format!("{name} in {system} is running low on jump fuel."),
            };
            ("Jump gate fuel alert".to_string(), detail)
        }
        NotificationType::Unknown(raw) => (
            raw.clone(),
            format!("Notification {raw} concerning {name} in {system}."),
        ),
    };

    Embed {
        title: Some(title),
        description: Some(description),
        color: Some(notif_type.category().color().value()),
        timestamp: Some(DateTime::<Utc>::from_naive_utc_and_offset(
            input.notification.timestamp,
            Utc,
        )),
    }
}

/// Assemble the full message for one webhook, applying ping suppression.
///
/// Pings are only added when both the owner and the webhook allow them; a
/// configured group mention is prepended to any ping content.
pub fn build_message(
    embed: Embed,
    notif_type: &NotificationType,
    webhook: &entity::webhook::Model,
    owner_pings_enabled: bool,
    color_override: Option<i32>,
    ping_override: Option<PingType>,
) -> DiscordMessage {
    let mut embed = embed;
    if let Some(color) = color_override {
        embed.color = Some(color);
    }

    let pings_enabled = owner_pings_enabled && webhook.has_default_pings_enabled;
    let ping = ping_override.unwrap_or_else(|| notif_type.category().default_ping());

    let mut content = String::new();
    if pings_enabled {
        if let Some(group) = webhook.ping_group.as_deref() {
            content.push_str(&format!("<@&{group}> "));
        }
        if let Some(mention) = ping.as_mention() {
            content.push_str(mention);
        }
    }

    DiscordMessage {
        content: (!content.is_empty()).then(|| content.trim_end().to_string()),
        username: Some("Structures".to_string()),
        avatar_url: None,
        embeds: vec![embed],
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::prelude::Json;

    use super::*;
    use crate::model::message::Color;

    fn notification(notif_type: &str, text: Option<&str>) -> entity::notification::Model {
        let now = Utc::now().naive_utc();
        entity::notification::Model {
            id: 1,
            owner_id: 1,
            notification_id: 100,
            sender_id: Some(1000),
            notif_type: notif_type.to_string(),
            text: text.map(str::to_string),
            timestamp: now,
            is_sent: false,
            is_timer_added: false,
            created_at: now,
            last_updated_at: now,
        }
    }

    fn structure(name: &str) -> entity::structure::Model {
        let now = Utc::now().naive_utc();
        entity::structure::Model {
            id: 1_000_000_000_001,
            owner_id: 1,
            name: name.to_string(),
            eve_type_id: 35832,
            type_name: "Astrahus".to_string(),
            solar_system_id: 30002537,
            solar_system_name: "Amamake".to_string(),
            solar_system_security: 0.4,
            category: "upwell".to_string(),
            state: "shield_vulnerable".to_string(),
            fuel_expires_at: None,
            last_online_at: None,
            state_timer_start: None,
            state_timer_end: None,
            unanchors_at: None,
            reinforce_hour: None,
            created_at: now,
            last_updated_at: now,
        }
    }

    fn webhook(pings_enabled: bool, ping_group: Option<&str>) -> entity::webhook::Model {
        entity::webhook::Model {
            id: 1,
            name: "test".to_string(),
            url: "https://discord.example/webhook".to_string(),
            notification_types: Json::Array(vec![]),
            is_active: true,
            is_default: false,
            has_default_pings_enabled: pings_enabled,
            ping_group: ping_group.map(str::to_string),
            language_code: None,
        }
    }

    #[test]
    fn test_render_under_attack() {
        let notif = notification("StructureUnderAttack", None);
        let structure = structure("Home Base");
        let embed = render_embed(&RenderInput {
            notification: &notif,
            structure: Some(&structure),
        });

        assert_eq!(embed.title.as_deref(), Some("Structure under attack"));
        assert!(embed.description.unwrap().contains("Home Base"));
        assert_eq!(embed.color, Some(Color::Danger.value()));
    }

    #[test]
    fn test_render_unknown_type_uses_generic_embed() {
        let notif = notification("SomethingNew", None);
        let embed = render_embed(&RenderInput {
            notification: &notif,
            structure: None,
        });

        assert_eq!(embed.title.as_deref(), Some("SomethingNew"));
        assert_eq!(embed.color, Some(Color::Info.value()));
    }

    #[test]
    fn test_render_without_structure_uses_placeholder() {
        let notif = notification("StructureLostShields", None);
        let embed = render_embed(&RenderInput {
            notification: &notif,
            structure: None,
        });
        assert!(embed
            .description
            .unwrap()
            .contains(STRUCTURE_NAME_PLACEHOLDER));
    }

    #[test]
    fn test_build_message_danger_pings_everyone() {
        let notif_type = NotificationType::StructureUnderAttack;
        let embed = Embed {
            title: Some("t".to_string()),
            description: None,
            color: None,
            timestamp: None,
        };
        let message = build_message(embed, &notif_type, &webhook(true, None), true, None, None);
        assert_eq!(message.content.as_deref(), Some("@everyone"));
    }

    #[test]
    fn test_build_message_suppresses_pings() {
        let notif_type = NotificationType::StructureUnderAttack;
        let embed = Embed {
            title: Some("t".to_string()),
            description: None,
            color: None,
            timestamp: None,
        };

        // Webhook-level suppression.
        let message = build_message(
            embed.clone(),
            &notif_type,
            &webhook(false, None),
            true,
            None,
            None,
        );
        assert_eq!(message.content, None);

        // Owner-level suppression.
        let message = build_message(embed, &notif_type, &webhook(true, None), false, None, None);
        assert_eq!(message.content, None);
    }

    #[test]
    fn test_build_message_includes_ping_group() {
        let notif_type = NotificationType::StructureFuelAlert;
        let embed = Embed {
            title: Some("t".to_string()),
            description: None,
            color: None,
            timestamp: None,
        };
        let message = build_message(
            embed,
            &notif_type,
            &webhook(true, Some("12345")),
            true,
            None,
            None,
        );
        assert_eq!(message.content.as_deref(), Some("<@&12345> @here"));
    }
}
