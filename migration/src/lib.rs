pub use sea_orm_migration::prelude::*;

mod m20260829_000001_owner;
mod m20260829_000002_owner_character;
mod m20260829_000003_structure;
mod m20260829_000004_structure_service;
mod m20260829_000005_owner_asset;
mod m20260829_000006_notification;
mod m20260829_000007_webhook;
mod m20260829_000008_webhook_assignments;
mod m20260829_000009_fuel_alert_config;
mod m20260829_000010_fuel_alert;
mod m20260829_000011_jump_fuel_alert_config;
mod m20260829_000012_jump_fuel_alert;
mod m20260829_000013_notification_delivery;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_owner::Migration),
            Box::new(m20260829_000002_owner_character::Migration),
            Box::new(m20260829_000003_structure::Migration),
            Box::new(m20260829_000004_structure_service::Migration),
            Box::new(m20260829_000005_owner_asset::Migration),
            Box::new(m20260829_000006_notification::Migration),
            Box::new(m20260829_000007_webhook::Migration),
            Box::new(m20260829_000008_webhook_assignments::Migration),
            Box::new(m20260829_000009_fuel_alert_config::Migration),
            Box::new(m20260829_000010_fuel_alert::Migration),
            Box::new(m20260829_000011_jump_fuel_alert_config::Migration),
            Box::new(m20260829_000012_jump_fuel_alert::Migration),
            Box::new(m20260829_000013_notification_delivery::Migration),
        ]
    }
}
