//! Notification fetch against a mock ESI server.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use structwatch::service::sync::notifications::fetch_notifications;
use structwatch_test_utils::prelude::*;

use crate::util;

#[tokio::test]
async fn test_fetch_stores_only_new_notifications() -> Result<(), TestError> {
    let mut setup = test_setup_with_all_tables!()?;
    let state = util::app_state(&setup);

    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    let webhook = factory::webhook(
        &setup.db,
        "alerts",
        "https://discord.example/webhook",
        &["StructureUnderAttack"],
    )
    .await?;
    factory::owner_webhook(&setup.db, owner.id, webhook.id).await?;

    // Notification 100 is already stored; only 101 is new.
    factory::notification(&setup.db, owner.id, 100, "StructureUnderAttack", None).await?;

    let body = serde_json::json!([
        {
            "notification_id": 100,
            "type": "StructureUnderAttack",
            "sender_id": 1000127,
            "timestamp": "2026-08-29T10:00:00Z",
            "text": "structureID: &id001 42\n",
        },
        {
            "notification_id": 101,
            "type": "StructureLostShields",
            "sender_id": 1000127,
            "timestamp": "2026-08-29T10:05:00Z",
            "text": "structureID: &id001 42\ntimeLeft: 1080000000000\n",
        },
    ]);
    let mock = setup
        .server
        .mock("GET", "/characters/95465499/notifications/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let webhook_ids = fetch_notifications(&state, owner.id).await.unwrap();

    mock.assert();
    assert_eq!(webhook_ids, vec![webhook.id]);

    let stored = entity::prelude::Notification::find()
        .filter(entity::notification::Column::OwnerId.eq(owner.id))
        .all(&setup.db)
        .await?;
    assert_eq!(stored.len(), 2);

    let new = stored
        .iter()
        .find(|row| row.notification_id == 101)
        .unwrap();
    assert_eq!(new.notif_type, "StructureLostShields");
    assert!(!new.is_sent);
    assert!(!new.is_timer_added);

    let owner = entity::prelude::Owner::find_by_id(owner.id)
        .one(&setup.db)
        .await?
        .unwrap();
    assert!(owner.notifications_last_update_at.is_some());

    Ok(())
}
