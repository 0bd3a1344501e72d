//! HTTP routing configuration.

use axum::{routing::get, Router};

use crate::{controller, model::app::AppState};

/// Build the application's HTTP router.
///
/// # Registered endpoints
/// - `GET /health` - Health probe for external monitoring
/// - `GET /api/status` - Detailed per-owner service status
/// - `GET /api/structures` - All tracked structures with power mode
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(controller::status::health))
        .route("/api/status", get(controller::status::service_status))
        .route("/api/structures", get(controller::structure::list_structures))
}
