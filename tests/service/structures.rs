//! Structure sync against a mock ESI server.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use structwatch::{
    data::{fuel_alert::FuelAlertRepository, structure::StructureRepository},
    service::sync::structures::update_structures,
};
use structwatch_test_utils::prelude::*;

use crate::util;

/// Mock the roles endpoint granting Station Manager, required before any
/// structure listing call.
async fn mock_station_manager(setup: &mut TestSetup, character_id: i64) -> mockito::Mock {
    setup
        .server
        .mock("GET", format!("/characters/{character_id}/roles/").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({"roles": ["Station_Manager"]}).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_sync_stores_enriched_structure_with_services() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    let roles_mock = mock_station_manager(&mut setup, 95465499).await;

    let listing = serde_json::json!([{
        "structure_id": 1021121988766i64,
        "type_id": 35832,
        "system_id": 30002537,
        "state": "shield_vulnerable",
        "fuel_expires": "2026-10-15T12:00:00Z",
        "services": [{"name": "Clone Bay", "state": "online"}],
    }]);
    let listing_mock = setup
        .server
        .mock("GET", "/corporations/2001/structures/")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing.to_string())
        .create_async()
        .await;
    let detail_mock = setup
        .server
        .mock("GET", "/universe/structures/1021121988766/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "name": "Wayne Tower",
                "solar_system_id": 30002537,
            })
            .to_string(),
        )
        .create_async()
        .await;
    let system_mock = setup
        .server
        .mock("GET", "/universe/systems/30002537/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "system_id": 30002537,
                "name": "Amamake",
                "security_status": 0.4,
            })
            .to_string(),
        )
        .create_async()
        .await;

    update_structures(&state, owner.id).await.unwrap();

    roles_mock.assert();
    listing_mock.assert();
    detail_mock.assert();
    system_mock.assert();

    let repo = StructureRepository::new(&setup.db);
    let stored = repo.find_by_id(1021121988766).await?.unwrap();
    assert_eq!(stored.name, "Wayne Tower");
    assert_eq!(stored.solar_system_name, "Amamake");
    assert_eq!(stored.category, "upwell");
    assert!(stored.fuel_expires_at.is_some());
    // Fueled structures are online right now.
    assert!(stored.last_online_at.is_some());

    let services = repo.get_services(stored.id).await?;
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "Clone Bay");

    let owner = entity::prelude::Owner::find_by_id(owner.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(owner.structures_last_update_at.is_some());

    Ok(())
}

#[tokio::test]
async fn test_sync_removes_structures_absent_from_listing() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    factory::structure(&setup.db, owner.id, 42, "Old Citadel").await?;
    let _roles_mock = mock_station_manager(&mut setup, 95465499).await;

    let listing_mock = setup
        .server
        .mock("GET", "/corporations/2001/structures/")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    update_structures(&state, owner.id).await.unwrap();

    listing_mock.assert();
    let stored = StructureRepository::new(&setup.db).find_by_id(42).await?;
    assert!(stored.is_none());

    Ok(())
}

#[tokio::test]
async fn test_sync_keeps_old_name_when_enrichment_fails() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    let existing = factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;
    let _roles_mock = mock_station_manager(&mut setup, 95465499).await;

    let listing = serde_json::json!([{
        "structure_id": 42,
        "type_id": 35832,
        "system_id": 30000142,
        "state": "shield_vulnerable",
    }]);
    let listing_mock = setup
        .server
        .mock("GET", "/corporations/2001/structures/")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing.to_string())
        .create_async()
        .await;
    // Enrichment is a permanent 404, so the old name survives. expect(1)
    // because permanent failures are not retried.
    let detail_mock = setup
        .server
        .mock("GET", "/universe/structures/42/")
        .with_status(404)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;
    let system_mock = setup
        .server
        .mock("GET", "/universe/systems/30000142/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "system_id": 30000142,
                "name": "Jita",
                "security_status": 0.9,
            })
            .to_string(),
        )
        .create_async()
        .await;

    update_structures(&state, owner.id).await.unwrap();

    listing_mock.assert();
    detail_mock.assert();
    system_mock.assert();

    let stored = StructureRepository::new(&setup.db)
        .find_by_id(42)
        .await?
        .unwrap();
    assert_eq!(stored.name, existing.name);

    Ok(())
}

#[tokio::test]
async fn test_refuel_emits_one_notification_and_clears_alert_markers() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    // Factory fuel expiry is a week out; the listing below reports a much
    // later one, which is the refuel signal.
    let structure = factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;
    let config = factory::fuel_alert_config(&setup.db, 48, 0, 12).await?;
    FuelAlertRepository::new(&setup.db)
        .mark_alerted(structure.id, config.id, 24)
        .await?;
    let _roles_mock = mock_station_manager(&mut setup, 95465499).await;

    let listing = serde_json::json!([{
        "structure_id": 42,
        "type_id": 35832,
        "system_id": 30000142,
        "state": "shield_vulnerable",
        "fuel_expires": "2027-06-01T00:00:00Z",
    }]);
    let _listing_mock = setup
        .server
        .mock("GET", "/corporations/2001/structures/")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing.to_string())
        .expect_at_least(2)
        .create_async()
        .await;
    let _detail_mock = setup
        .server
        .mock("GET", "/universe/structures/42/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "name": "Wayne Tower",
                "solar_system_id": 30000142,
            })
            .to_string(),
        )
        .expect_at_least(2)
        .create_async()
        .await;
    let _system_mock = setup
        .server
        .mock("GET", "/universe/systems/30000142/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "system_id": 30000142,
                "name": "Jita",
                "security_status": 0.9,
            })
            .to_string(),
        )
        .expect_at_least(2)
        .create_async()
        .await;

    // A second sync sees the same fuel expiry, so only the first one is a
    // refuel.
    update_structures(&state, owner.id).await.unwrap();
    update_structures(&state, owner.id).await.unwrap();

    let refueled = entity::prelude::Notification::find()
        .filter(entity::notification::Column::NotifType.eq("StructureRefueledExtra"))
        .all(&setup.db)
        .await?;
    assert_eq!(refueled.len(), 1);
    assert!(!refueled[0].is_sent);
    // Generated rows live in the negative ID space.
    assert!(refueled[0].notification_id <= -1_000_000);

    // Markers are gone so the alert window can fire again on the next
    // depletion.
    let markers = entity::prelude::FuelAlert::find().all(&setup.db).await?;
    assert!(markers.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_sync_deactivates_owner_with_no_valid_credentials() -> Result<(), TestError> {
    let setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;

    update_structures(&state, owner.id).await.unwrap();

    let owner = entity::prelude::Owner::find_by_id(owner.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(!owner.is_active);

    Ok(())
}

#[tokio::test]
async fn test_sync_invalidates_credential_on_unauthorized() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let character = factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;

    // The role check fails with 403, so the listing is never requested.
    let roles_mock = setup
        .server
        .mock("GET", "/characters/95465499/roles/")
        .with_status(403)
        .with_body("token is not valid")
        .create_async()
        .await;
    let listing_mock = setup
        .server
        .mock("GET", "/corporations/2001/structures/")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .expect(0)
        .create_async()
        .await;

    update_structures(&state, owner.id).await.unwrap();

    roles_mock.assert();
    listing_mock.assert();

    let stored = entity::prelude::OwnerCharacter::find_by_id(character.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(!stored.is_valid);
    // The only credential was invalidated, so the owner was deactivated.
    let owner = entity::prelude::Owner::find_by_id(owner.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(!owner.is_active);

    Ok(())
}
