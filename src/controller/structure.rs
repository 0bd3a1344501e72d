//! Structures listing endpoint.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::{Duration, Utc};

use crate::{
    controller::status::CAPABILITIES_HEADER,
    data::{owner::OwnerRepository, structure::StructureRepository},
    error::Error,
    model::{
        api::{ErrorDto, StructureDto},
        app::AppState,
    },
    service::{
        access::{Capability, UserCapabilities},
        power::PowerMode,
    },
};

/// List all tracked structures with their inferred power mode.
///
/// # Responses
/// - 200 with the structure list
/// - 403 when the caller lacks the `view-all-owners` capability
/// - 500 on a database error
pub async fn list_structures(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let capabilities = headers
        .get(CAPABILITIES_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(UserCapabilities::from_header)
        .unwrap_or_default();

    if !capabilities.is_allowed(Capability::ViewAllOwners) {
        return Ok((
            StatusCode::FORBIDDEN,
            axum::Json(ErrorDto {
                error: "Missing view-all-owners capability".to_string(),
            }),
        )
            .into_response());
    }

    let owners: HashMap<i32, i64> = OwnerRepository::new(&state.db)
        .get_active()
        .await?
        .into_iter()
        .map(|owner| (owner.id, owner.corporation_id))
        .collect();

    let now = Utc::now();
    let recency_window = Duration::days(state.settings.abandoned_recency_days);

    let structures: Vec<StructureDto> = StructureRepository::new(&state.db)
        .get_all()
        .await?
        .into_iter()
        .map(|structure| {
            let power_mode = (structure.category == "upwell").then(|| {
                PowerMode::infer(
                    structure.fuel_expires_at.map(|dt| dt.and_utc()),
                    structure.last_online_at.map(|dt| dt.and_utc()),
                    now,
                    recency_window,
                )
                .to_string()
            });
            StructureDto {
                id: structure.id,
                owner_corporation_id: owners.get(&structure.owner_id).copied().unwrap_or(0),
                name: structure.name,
                type_name: structure.type_name,
                solar_system_name: structure.solar_system_name,
                category: structure.category,
                state: structure.state,
                power_mode,
                fuel_expires_at: structure.fuel_expires_at,
                last_online_at: structure.last_online_at,
                unanchors_at: structure.unanchors_at,
            }
        })
        .collect();

    Ok((StatusCode::OK, axum::Json(structures)).into_response())
}
