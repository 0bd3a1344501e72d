//! The known notification type set and its classification.

use crate::model::message::{Color, PingType};

/// Semantic category of a notification, driving embed color and pings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Info,
    Warning,
    Danger,
}

impl Category {
    pub fn color(self) -> Color {
        match self {
            Self::Success => Color::Success,
            Self::Info => Color::Info,
            Self::Warning => Color::Warning,
            Self::Danger => Color::Danger,
        }
    }

    /// Default channel ping for this category, absent suppression.
    pub fn default_ping(self) -> PingType {
        match self {
            Self::Success | Self::Info => PingType::None,
            Self::Warning => PingType::Here,
            Self::Danger => PingType::Everyone,
        }
    }
}

/// Tagged representation of the raw notification type string.
///
/// The variant set covers every type this app renders; anything else is
/// carried through as `Unknown` and rendered generically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    // Upwell structures
    StructureAnchoring,
    StructureOnline,
    StructureUnanchoring,
    StructureUnderAttack,
    StructureLostShields,
    StructureLostArmor,
    StructureDestroyed,
    StructureFuelAlert,
    StructureWentLowPower,
    StructureWentHighPower,
    StructureServicesOffline,
    StructuresReinforcementChanged,
    OwnershipTransferred,
    // Customs offices
    OrbitalAttacked,
    OrbitalReinforced,
    // Starbases
    TowerAlertMsg,
    TowerResourceAlertMsg,
    // Moon mining
    MoonminingExtractionStarted,
    MoonminingExtractionFinished,
    MoonminingExtractionCancelled,
    MoonminingLaserFired,
    MoonminingAutomaticFracture,
    // Sovereignty
    SovStructureReinforced,
    SovStructureDestroyed,
    SovAllClaimAcquiredMsg,
    SovAllClaimLostMsg,
    EntosisCaptureStarted,
    SovCommandNodeEventStarted,
    AllAnchoringMsg,
    // Locally generated
    StructureRefueledExtra,
    TowerRefueledExtra,
    StructureJumpFuelAlert,
    // Anything else
    Unknown(String),
}

impl NotificationType {
    /// Parse the raw type string. Total: never fails.
    pub fn from_type_string(raw: &str) -> Self {
        match raw {
            "StructureAnchoring" => Self::StructureAnchoring,
            "StructureOnline" => Self::StructureOnline,
            "StructureUnanchoring" => Self::StructureUnanchoring,
            "StructureUnderAttack" => Self::StructureUnderAttack,
            "StructureLostShields" => Self::StructureLostShields,
            "StructureLostArmor" => Self::StructureLostArmor,
            "StructureDestroyed" => Self::StructureDestroyed,
            "StructureFuelAlert" => Self::StructureFuelAlert,
            "StructureWentLowPower" => Self::StructureWentLowPower,
            "StructureWentHighPower" => Self::StructureWentHighPower,
            "StructureServicesOffline" => Self::StructureServicesOffline,
            "StructuresReinforcementChanged" => Self::StructuresReinforcementChanged,
            "OwnershipTransferred" => Self::OwnershipTransferred,
            "OrbitalAttacked" => Self::OrbitalAttacked,
            "OrbitalReinforced" => Self::OrbitalReinforced,
            "TowerAlertMsg" => Self::TowerAlertMsg,
            "TowerResourceAlertMsg" => Self::TowerResourceAlertMsg,
            "MoonminingExtractionStarted" => Self::MoonminingExtractionStarted,
            "MoonminingExtractionFinished" => Self::MoonminingExtractionFinished,
            "MoonminingExtractionCancelled" => Self::MoonminingExtractionCancelled,
            "MoonminingLaserFired" => Self::MoonminingLaserFired,
            "MoonminingAutomaticFracture" => Self::MoonminingAutomaticFracture,
            "SovStructureReinforced" => Self::SovStructureReinforced,
            "SovStructureDestroyed" => Self::SovStructureDestroyed,
            "SovAllClaimAquiredMsg" | "SovAllClaimAcquiredMsg" => Self::SovAllClaimAcquiredMsg,
            "SovAllClaimLostMsg" => Self::SovAllClaimLostMsg,
            "EntosisCaptureStarted" => Self::EntosisCaptureStarted,
            "SovCommandNodeEventStarted" => Self::SovCommandNodeEventStarted,
            "AllAnchoringMsg" => Self::AllAnchoringMsg,
            "StructureRefueledExtra" => Self::StructureRefueledExtra,
            "TowerRefueledExtra" => Self::TowerRefueledExtra,
            "StructureJumpFuelAlert" => Self::StructureJumpFuelAlert,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire-format type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::StructureAnchoring => "StructureAnchoring",
            Self::StructureOnline => "StructureOnline",
            Self::StructureUnanchoring => "StructureUnanchoring",
            Self::StructureUnderAttack => "StructureUnderAttack",
            Self::StructureLostShields => "StructureLostShields",
            Self::StructureLostArmor => "StructureLostArmor",
            Self::StructureDestroyed => "StructureDestroyed",
            Self::StructureFuelAlert => "StructureFuelAlert",
            Self::StructureWentLowPower => "StructureWentLowPower",
            Self::StructureWentHighPower => "StructureWentHighPower",
            Self::StructureServicesOffline => "StructureServicesOffline",
            Self::StructuresReinforcementChanged => "StructuresReinforcementChanged",
            Self::OwnershipTransferred => "OwnershipTransferred",
            Self::OrbitalAttacked => "OrbitalAttacked",
            Self::OrbitalReinforced => "OrbitalReinforced",
            Self::TowerAlertMsg => "TowerAlertMsg",
            Self::TowerResourceAlertMsg => "TowerResourceAlertMsg",
            Self::MoonminingExtractionStarted => "MoonminingExtractionStarted",
            Self::MoonminingExtractionFinished => "MoonminingExtractionFinished",
            Self::MoonminingExtractionCancelled => "MoonminingExtractionCancelled",
            Self::MoonminingLaserFired => "MoonminingLaserFired",
            Self::MoonminingAutomaticFracture => "MoonminingAutomaticFracture",
            Self::SovStructureReinforced => "SovStructureReinforced",
            Self::SovStructureDestroyed => "SovStructureDestroyed",
            Self::SovAllClaimAcquiredMsg => "SovAllClaimAquiredMsg",
            Self::SovAllClaimLostMsg => "SovAllClaimLostMsg",
            Self::EntosisCaptureStarted => "EntosisCaptureStarted",
            Self::SovCommandNodeEventStarted => "SovCommandNodeEventStarted",
            Self::AllAnchoringMsg => "AllAnchoringMsg",
            Self::StructureRefueledExtra => "StructureRefueledExtra",
            Self::TowerRefueledExtra => "TowerRefueledExtra",
            Self::StructureJumpFuelAlert => "StructureJumpFuelAlert",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::StructureOnline
            | Self::StructureWentHighPower
            | Self::SovAllClaimAcquiredMsg => Category::Success,

            Self::StructureAnchoring
            | Self::StructureUnanchoring
            | Self::StructuresReinforcementChanged
            | Self::OwnershipTransferred
            | Self::MoonminingExtractionStarted
            | Self::MoonminingExtractionFinished
            | Self::MoonminingLaserFired
            | Self::MoonminingAutomaticFracture
            | Self::SovAllClaimLostMsg
            | Self::AllAnchoringMsg
            | Self::StructureRefueledExtra
            | Self::TowerRefueledExtra
            | Self::Unknown(_) => Category::Info,

            Self::StructureFuelAlert
            | Self::StructureWentLowPower
            | Self::StructureJumpFuelAlert
            | Self::MoonminingExtractionCancelled
            | Self::OrbitalAttacked
            | Self::TowerAlertMsg
            | Self::TowerResourceAlertMsg => Category::Warning,

            Self::StructureUnderAttack
            | Self::StructureLostShields
            | Self::StructureLostArmor
            | Self::StructureDestroyed
            | Self::StructureServicesOffline
            | Self::OrbitalReinforced
            | Self::SovStructureReinforced
            | Self::SovStructureDestroyed
            | Self::EntosisCaptureStarted
            | Self::SovCommandNodeEventStarted => Category::Danger,
        }
    }

    /// Whether a qualifying notification of this type creates a timer.
    ///
    /// Anchoring timers are additionally excluded in null security space,
    /// which the timer processor checks against the structure's system.
    pub fn creates_timer(&self) -> bool {
        matches!(
            self,
            Self::StructureLostShields
                | Self::StructureLostArmor
                | Self::StructureAnchoring
                | Self::OrbitalReinforced
                | Self::MoonminingExtractionStarted
                | Self::SovStructureReinforced
        )
    }

    /// Every known wire-format type string.
    pub fn all_known() -> Vec<&'static str> {
        vec![
            "StructureAnchoring",
            "StructureOnline",
            "StructureUnanchoring",
            "StructureUnderAttack",
            "StructureLostShields",
            "StructureLostArmor",
            "StructureDestroyed",
            "StructureFuelAlert",
            "StructureWentLowPower",
            "StructureWentHighPower",
            "StructureServicesOffline",
            "StructuresReinforcementChanged",
            "OwnershipTransferred",
            "OrbitalAttacked",
            "OrbitalReinforced",
            "TowerAlertMsg",
            "TowerResourceAlertMsg",
            "MoonminingExtractionStarted",
            "MoonminingExtractionFinished",
            "MoonminingExtractionCancelled",
            "MoonminingLaserFired",
            "MoonminingAutomaticFracture",
            "SovStructureReinforced",
            "SovStructureDestroyed",
            "SovAllClaimAquiredMsg",
            "SovAllClaimLostMsg",
            "EntosisCaptureStarted",
            "SovCommandNodeEventStarted",
            "AllAnchoringMsg",
            "StructureRefueledExtra",
            "TowerRefueledExtra",
            "StructureJumpFuelAlert",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_round_trip() {
        for raw in NotificationType::all_known() {
            let parsed = NotificationType::from_type_string(raw);
            assert!(
                !matches!(parsed, NotificationType::Unknown(_)),
                "{raw} should parse to a known variant"
            );
            assert_eq!(parsed.as_str(), raw);
        }
    }

    #[test]
    fn test_unknown_type_defaults_to_info() {
        let parsed = NotificationType::from_type_string("SomeBrandNewType");
        assert_eq!(
            parsed,
            NotificationType::Unknown("SomeBrandNewType".to_string())
        );
        assert_eq!(parsed.category(), Category::Info);
        assert!(!parsed.creates_timer());
    }

    #[test]
    fn test_category_pings() {
        use crate::model::message::PingType;

        assert_eq!(Category::Success.default_ping(), PingType::None);
        assert_eq!(Category::Info.default_ping(), PingType::None);
        assert_eq!(Category::Warning.default_ping(), PingType::Here);
        assert_eq!(Category::Danger.default_ping(), PingType::Everyone);
    }

    #[test]
    fn test_attack_notifications_are_danger() {
        for raw in ["StructureUnderAttack", "StructureLostShields", "OrbitalReinforced"] {
            assert_eq!(
                NotificationType::from_type_string(raw).category(),
                Category::Danger
            );
        }
    }

    #[test]
    fn test_timer_rules() {
        assert!(NotificationType::StructureLostShields.creates_timer());
        assert!(NotificationType::MoonminingExtractionStarted.creates_timer());
        assert!(!NotificationType::StructureUnderAttack.creates_timer());
        assert!(!NotificationType::StructureFuelAlert.creates_timer());
    }
}
