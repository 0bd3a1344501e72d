//! Typed ESI response payloads, limited to the fields this app consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry from the corporation structures endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiCorporationStructure {
    pub structure_id: i64,
    pub type_id: i64,
    pub system_id: i64,
    pub state: String,
    #[serde(default)]
    pub fuel_expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state_timer_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state_timer_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unanchors_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reinforce_hour: Option<i32>,
    #[serde(default)]
    pub services: Option<Vec<EsiStructureService>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiStructureService {
    pub name: String,
    pub state: String,
}

/// Detail from the universe structures endpoint, used for enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiUniverseStructure {
    pub name: String,
    pub solar_system_id: i64,
    #[serde(default)]
    pub type_id: Option<i64>,
}

/// Solar system info from the public universe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiSolarSystem {
    pub system_id: i64,
    pub name: String,
    pub security_status: f64,
}

/// One entry from the corporation assets endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiAsset {
    pub item_id: i64,
    pub type_id: i64,
    pub location_id: i64,
    pub location_flag: String,
    pub quantity: i64,
}

/// One entry from the character notifications endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiNotification {
    pub notification_id: i64,
    #[serde(rename = "type")]
    pub notif_type: String,
    #[serde(default)]
    pub sender_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Character corporation roles, used to verify the credential still has
/// the Station_Manager role required for structure endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiCharacterRoles {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl EsiCharacterRoles {
    pub fn has_station_manager(&self) -> bool {
        self.roles
            .iter()
            .any(|role| role == "Station_Manager" || role == "Director")
    }
}

/// One entry from the corporation customs offices endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiCustomsOffice {
    pub office_id: i64,
    pub system_id: i64,
    #[serde(default)]
    pub reinforce_exit_start: Option<i32>,
    #[serde(default)]
    pub reinforce_exit_end: Option<i32>,
}

/// One entry from the corporation starbases endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiStarbase {
    pub starbase_id: i64,
    pub type_id: i64,
    pub system_id: i64,
    pub state: String,
    #[serde(default)]
    pub reinforced_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unanchor_at: Option<DateTime<Utc>>,
}
