//! Structures listing route and its capability guard.

use axum::{
    body::to_bytes,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};
use structwatch::{controller, model::api::StructureDto};
use structwatch_test_utils::prelude::*;

use crate::util;

fn headers_with_capabilities(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-capabilities", HeaderValue::from_str(value).unwrap());
    headers
}

#[tokio::test]
async fn test_listing_requires_view_all_owners_capability() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let response = controller::structure::list_structures(
        State(state.clone()),
        headers_with_capabilities("view-service-status"),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(response.status(), 403);

    let response =
        controller::structure::list_structures(State(state), HeaderMap::new())
            .await
            .unwrap()
            .into_response();
    assert_eq!(response.status(), 403);

    Ok(())
}

#[tokio::test]
async fn test_listing_reports_inferred_power_mode() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;

    // Unfueled and offline for a month: abandoned.
    let derelict = factory::structure(&setup.db, owner.id, 43, "Derelict Citadel").await?;
    let mut derelict = derelict.into_active_model();
    derelict.fuel_expires_at = Set(Some(Utc::now().naive_utc() - Duration::days(30)));
    derelict.last_online_at = Set(Some(Utc::now().naive_utc() - Duration::days(30)));
    derelict.update(&setup.db).await?;

    let response = controller::structure::list_structures(
        State(state),
        headers_with_capabilities("view-all-owners"),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(response.status(), 200);

    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let mut structures: Vec<StructureDto> = serde_json::from_slice(&body).unwrap();
    structures.sort_by_key(|s| s.id);

    assert_eq!(structures.len(), 2);
    assert_eq!(structures[0].power_mode.as_deref(), Some("Full Power"));
    assert_eq!(structures[1].power_mode.as_deref(), Some("Abandoned"));
    assert_eq!(structures[0].owner_corporation_id, 2001);

    Ok(())
}
