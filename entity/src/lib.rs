//! Database entity definitions for structwatch.

pub mod fuel_alert;
pub mod fuel_alert_config;
pub mod jump_fuel_alert;
pub mod jump_fuel_alert_config;
pub mod notification;
pub mod notification_delivery;
pub mod owner;
pub mod owner_asset;
pub mod owner_character;
pub mod owner_webhook;
pub mod structure;
pub mod structure_service;
pub mod structure_webhook;
pub mod webhook;

pub mod prelude {
    pub use super::fuel_alert::Entity as FuelAlert;
    pub use super::fuel_alert_config::Entity as FuelAlertConfig;
    pub use super::jump_fuel_alert::Entity as JumpFuelAlert;
    pub use super::jump_fuel_alert_config::Entity as JumpFuelAlertConfig;
    pub use super::notification::Entity as Notification;
    pub use super::notification_delivery::Entity as NotificationDelivery;
    pub use super::owner::Entity as Owner;
    pub use super::owner_asset::Entity as OwnerAsset;
    pub use super::owner_character::Entity as OwnerCharacter;
    pub use super::owner_webhook::Entity as OwnerWebhook;
    pub use super::structure::Entity as Structure;
    pub use super::structure_service::Entity as StructureService;
    pub use super::structure_webhook::Entity as StructureWebhook;
    pub use super::webhook::Entity as Webhook;
}
