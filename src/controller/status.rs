//! Health probe and service status endpoints.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    error::Error,
    model::{api::ErrorDto, app::AppState},
    service::{
        access::{Capability, UserCapabilities},
        status,
    },
};

/// Header carrying the caller's comma-separated capability tokens. The
/// reverse proxy in front of this service resolves the caller's roles and
/// injects the header.
pub const CAPABILITIES_HEADER: &str = "x-capabilities";

/// Health probe for external monitoring.
///
/// # Responses
/// - 200 with body `service is up` when every monitored owner is healthy
/// - 500 with body `service is down` otherwise
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let status = status::service_status(&state).await?;

    if status.is_up {
        Ok((StatusCode::OK, "service is up"))
    } else {
        Ok((StatusCode::INTERNAL_SERVER_ERROR, "service is down"))
    }
}

/// Detailed per-owner service status.
///
/// # Responses
/// - 200 with the per-owner status breakdown
/// - 403 when the caller lacks the `view-service-status` capability
/// - 500 on a database error
pub async fn service_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let capabilities = headers
        .get(CAPABILITIES_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(UserCapabilities::from_header)
        .unwrap_or_default();

    if !capabilities.is_allowed(Capability::ViewServiceStatus) {
        return Ok((
            StatusCode::FORBIDDEN,
            axum::Json(ErrorDto {
                error: "Missing view-service-status capability".to_string(),
            }),
        )
            .into_response());
    }

    let status = status::service_status(&state).await?;

    Ok((StatusCode::OK, axum::Json(status)).into_response())
}
