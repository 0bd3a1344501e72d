//! Edge-triggered health notices and the health probe.

use axum::{body::to_bytes, extract::State, response::IntoResponse};
use structwatch::{
    controller,
    data::owner::{OwnerRepository, SyncCycle},
    service::{status::check_service_status, webhook::WebhookDispatcher},
};
use structwatch_test_utils::prelude::*;

use crate::util;

fn dispatcher() -> WebhookDispatcher {
    WebhookDispatcher::new(std::time::Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_transition_notices_are_edge_triggered() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    // Never synced, so the owner starts down.
    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;

    let admin_url = format!("{}/admin-hook", setup.server.url());

    // The first observation is stored silently; repeated checks in the same
    // state stay silent too.
    let silent_mock = setup
        .server
        .mock("POST", "/admin-hook")
        .with_status(204)
        .expect(0)
        .create_async()
        .await;
    check_service_status(&state, &dispatcher(), Some(admin_url.as_str()))
        .await
        .unwrap();
    check_service_status(&state, &dispatcher(), Some(admin_url.as_str()))
        .await
        .unwrap();
    silent_mock.assert();

    // Both sync cycles succeed, so the next check emits exactly one
    // recovery notice.
    let repo = OwnerRepository::new(&setup.db);
    repo.update_liveness(owner.id, SyncCycle::Structures).await?;
    repo.update_liveness(owner.id, SyncCycle::Notifications)
        .await?;

    let recovery_mock = setup
        .server
        .mock("POST", "/admin-hook")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    check_service_status(&state, &dispatcher(), Some(admin_url.as_str()))
        .await
        .unwrap();
    check_service_status(&state, &dispatcher(), Some(admin_url.as_str()))
        .await
        .unwrap();
    recovery_mock.assert();

    Ok(())
}

#[tokio::test]
async fn test_health_probe_reports_service_state() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;

    // Stale owner: probe reports down.
    let response = controller::status::health(State(state.clone()))
        .await
        .unwrap()
        .into_response();
    assert_eq!(response.status(), 500);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"service is down");

    let repo = OwnerRepository::new(&setup.db);
    repo.update_liveness(owner.id, SyncCycle::Structures).await?;
    repo.update_liveness(owner.id, SyncCycle::Notifications)
        .await?;

    let response = controller::status::health(State(state))
        .await
        .unwrap()
        .into_response();
    assert_eq!(response.status(), 200);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"service is up");

    Ok(())
}
