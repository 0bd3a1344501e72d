//! Game constants used across sync and derived-event generation.

/// EVE type ID of an Ansiblex Jump Gate.
pub const EVE_TYPE_ID_JUMP_GATE: i64 = 35841;

/// EVE type ID of Liquid Ozone, the jump gate fuel.
pub const EVE_TYPE_ID_LIQUID_OZONE: i64 = 16273;

/// EVE type ID of a Customs Office.
pub const EVE_TYPE_ID_POCO: i64 = 2233;

/// Notification IDs below this value are reserved for locally generated
/// notifications and never collide with ESI-assigned IDs.
pub const GENERATED_NOTIFICATION_ID_BASE: i64 = -1_000_000;

/// Placeholder name stored when per-structure enrichment fails.
pub const STRUCTURE_NAME_PLACEHOLDER: &str = "(no data)";
