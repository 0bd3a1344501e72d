//! Forwarding passes against a mock Discord webhook.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use structwatch::service::webhook::{forward::send_pending_messages, WebhookDispatcher};
use structwatch_test_utils::prelude::*;

use crate::util;

fn dispatcher() -> WebhookDispatcher {
    WebhookDispatcher::new(std::time::Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_pending_notifications_are_delivered_and_marked_sent() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;
    let webhook_url = format!("{}/hook", setup.server.url());
    let webhook = factory::webhook(&setup.db, "alerts", &webhook_url, &["StructureUnderAttack"])
        .await?;
    factory::owner_webhook(&setup.db, owner.id, webhook.id).await?;

    factory::notification(
        &setup.db,
        owner.id,
        100,
        "StructureUnderAttack",
        Some("structureID: &id001 42\n"),
    )
    .await?;
    factory::notification(
        &setup.db,
        owner.id,
        101,
        "StructureUnderAttack",
        Some("structureID: &id001 42\n"),
    )
    .await?;

    let hook_mock = setup
        .server
        .mock("POST", "/hook")
        .with_status(204)
        .expect(2)
        .create_async()
        .await;

    send_pending_messages(&state, &dispatcher(), webhook.id)
        .await
        .unwrap();

    hook_mock.assert();

    let unsent = entity::prelude::Notification::find()
        .filter(entity::notification::Column::IsSent.eq(false))
        .all(&setup.db)
        .await?;
    assert!(unsent.is_empty());

    let owner = entity::prelude::Owner::find_by_id(owner.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(owner.forwarding_last_update_at.is_some());

    Ok(())
}

#[tokio::test]
async fn test_delivery_failure_stops_the_owner_queue() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let webhook_url = format!("{}/hook", setup.server.url());
    let webhook = factory::webhook(&setup.db, "alerts", &webhook_url, &["StructureUnderAttack"])
        .await?;
    factory::owner_webhook(&setup.db, owner.id, webhook.id).await?;

    factory::notification(&setup.db, owner.id, 100, "StructureUnderAttack", None).await?;
    factory::notification(&setup.db, owner.id, 101, "StructureUnderAttack", None).await?;

    // One retry is configured, so the oldest notification is attempted
    // twice and the newer one is never attempted.
    let hook_mock = setup
        .server
        .mock("POST", "/hook")
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    send_pending_messages(&state, &dispatcher(), webhook.id)
        .await
        .unwrap();

    hook_mock.assert();

    let sent = entity::prelude::Notification::find()
        .filter(entity::notification::Column::IsSent.eq(true))
        .all(&setup.db)
        .await?;
    assert!(sent.is_empty());

    // A stopped queue must not advance the forwarding liveness.
    let owner = entity::prelude::Owner::find_by_id(owner.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(owner.forwarding_last_update_at.is_none());

    Ok(())
}

#[tokio::test]
async fn test_disabled_type_is_not_delivered() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let webhook_url = format!("{}/hook", setup.server.url());
    let webhook =
        factory::webhook(&setup.db, "alerts", &webhook_url, &["StructureDestroyed"]).await?;
    factory::owner_webhook(&setup.db, owner.id, webhook.id).await?;

    factory::notification(&setup.db, owner.id, 100, "StructureUnderAttack", None).await?;

    let hook_mock = setup
        .server
        .mock("POST", "/hook")
        .with_status(204)
        .expect(0)
        .create_async()
        .await;

    send_pending_messages(&state, &dispatcher(), webhook.id)
        .await
        .unwrap();

    hook_mock.assert();

    let stored = entity::prelude::Notification::find()
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(!stored.is_sent);

    Ok(())
}

#[tokio::test]
async fn test_overlapping_passes_deliver_to_each_webhook_exactly_once() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;

    let first_url = format!("{}/first-hook", setup.server.url());
    let first =
        factory::webhook(&setup.db, "first", &first_url, &["StructureUnderAttack"]).await?;
    factory::owner_webhook(&setup.db, owner.id, first.id).await?;

    let second_url = format!("{}/second-hook", setup.server.url());
    let second =
        factory::webhook(&setup.db, "second", &second_url, &["StructureUnderAttack"]).await?;
    factory::owner_webhook(&setup.db, owner.id, second.id).await?;

    factory::notification(&setup.db, owner.id, 100, "StructureUnderAttack", None).await?;

    let first_mock = setup
        .server
        .mock("POST", "/first-hook")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let second_mock = setup
        .server
        .mock("POST", "/second-hook")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    // A pass posts only to its own webhook, so the notification stays
    // unsent until every eligible webhook has a delivery record.
    send_pending_messages(&state, &dispatcher(), first.id)
        .await
        .unwrap();
    let stored = entity::prelude::Notification::find()
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(!stored.is_sent);

    // Re-running the same pass must not post a duplicate.
    send_pending_messages(&state, &dispatcher(), first.id)
        .await
        .unwrap();

    send_pending_messages(&state, &dispatcher(), second.id)
        .await
        .unwrap();

    first_mock.assert();
    second_mock.assert();

    let stored = entity::prelude::Notification::find()
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(stored.is_sent);

    Ok(())
}

#[tokio::test]
async fn test_structure_webhooks_override_owner_webhooks() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let structure = factory::structure(&setup.db, owner.id, 42, "Wayne Tower").await?;

    let owner_hook_url = format!("{}/owner-hook", setup.server.url());
    let owner_hook = factory::webhook(
        &setup.db,
        "owner-alerts",
        &owner_hook_url,
        &["StructureUnderAttack"],
    )
    .await?;
    factory::owner_webhook(&setup.db, owner.id, owner_hook.id).await?;

    let structure_hook_url = format!("{}/structure-hook", setup.server.url());
    let structure_hook = factory::webhook(
        &setup.db,
        "structure-alerts",
        &structure_hook_url,
        &["StructureUnderAttack"],
    )
    .await?;
    factory::structure_webhook(&setup.db, structure.id, structure_hook.id).await?;

    factory::notification(
        &setup.db,
        owner.id,
        100,
        "StructureUnderAttack",
        Some("structureID: &id001 42\n"),
    )
    .await?;

    let owner_hook_mock = setup
        .server
        .mock("POST", "/owner-hook")
        .with_status(204)
        .expect(0)
        .create_async()
        .await;
    let structure_hook_mock = setup
        .server
        .mock("POST", "/structure-hook")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    // The owner-level pass skips the notification because the structure's
    // own webhook set replaces the owner's.
    send_pending_messages(&state, &dispatcher(), owner_hook.id)
        .await
        .unwrap();

    let stored = entity::prelude::Notification::find()
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(!stored.is_sent);

    send_pending_messages(&state, &dispatcher(), structure_hook.id)
        .await
        .unwrap();

    owner_hook_mock.assert();
    structure_hook_mock.assert();

    let stored = entity::prelude::Notification::find()
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(stored.is_sent);

    Ok(())
}
