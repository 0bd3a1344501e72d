//! Shared application state for HTTP handlers and background jobs.

use sea_orm::DatabaseConnection;

use crate::{config::AppSettings, esi::EsiClient};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub esi_client: EsiClient,
    pub settings: AppSettings,
}
