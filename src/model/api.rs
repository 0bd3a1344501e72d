//! DTOs for the HTTP status surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Per-owner health detail exposed on the status route.
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerStatusDto {
    pub corporation_id: i64,
    pub corporation_name: String,
    pub is_structure_sync_ok: bool,
    pub is_notification_sync_ok: bool,
    pub is_forwarding_sync_ok: bool,
    pub has_valid_character: bool,
    pub is_up: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatusDto {
    pub is_up: bool,
    pub owners: Vec<OwnerStatusDto>,
}

/// One tracked structure as exposed on the structures route. `power_mode`
/// is inferred at read time and only set for upwell structures.
#[derive(Debug, Serialize, Deserialize)]
pub struct StructureDto {
    pub id: i64,
    pub owner_corporation_id: i64,
    pub name: String,
    pub type_name: String,
    pub solar_system_name: String,
    pub category: String,
    pub state: String,
    pub power_mode: Option<String>,
    pub fuel_expires_at: Option<chrono::NaiveDateTime>,
    pub last_online_at: Option<chrono::NaiveDateTime>,
    pub unanchors_at: Option<chrono::NaiveDateTime>,
}
