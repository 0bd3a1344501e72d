//! Credential rotation across an owner's characters.

use structwatch::data::owner::{OwnerRepository, SyncCycle};
use structwatch_test_utils::prelude::*;

#[tokio::test]
async fn test_rotation_cycles_through_credentials_in_order() -> Result<(), TestError> {
    let setup = test_setup_with_tables!(entity::prelude::Owner, entity::prelude::OwnerCharacter)?;
    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let alpha = factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    let bravo = factory::character(&setup.db, owner.id, 95465500, "Clark Kent").await?;
    let charlie = factory::character(&setup.db, owner.id, 95465501, "Diana Prince").await?;

    let repo = OwnerRepository::new(&setup.db);

    // Never-used credentials go first, in insertion order.
    let first = repo
        .next_character(owner.id, SyncCycle::Notifications)
        .await?
        .unwrap();
    let second = repo
        .next_character(owner.id, SyncCycle::Notifications)
        .await?
        .unwrap();
    let third = repo
        .next_character(owner.id, SyncCycle::Notifications)
        .await?
        .unwrap();
    assert_eq!(first.id, alpha.id);
    assert_eq!(second.id, bravo.id);
    assert_eq!(third.id, charlie.id);

    // The fourth pick wraps back to the least recently used.
    let fourth = repo
        .next_character(owner.id, SyncCycle::Notifications)
        .await?
        .unwrap();
    assert_eq!(fourth.id, alpha.id);

    Ok(())
}

#[tokio::test]
async fn test_rotation_cursors_are_independent_per_cycle() -> Result<(), TestError> {
    let setup = test_setup_with_tables!(entity::prelude::Owner, entity::prelude::OwnerCharacter)?;
    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let alpha = factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    let _bravo = factory::character(&setup.db, owner.id, 95465500, "Clark Kent").await?;

    let repo = OwnerRepository::new(&setup.db);

    let picked = repo
        .next_character(owner.id, SyncCycle::Notifications)
        .await?
        .unwrap();
    assert_eq!(picked.id, alpha.id);

    // Using a credential for notifications must not advance the structure
    // rotation.
    let picked = repo
        .next_character(owner.id, SyncCycle::Structures)
        .await?
        .unwrap();
    assert_eq!(picked.id, alpha.id);

    Ok(())
}

#[tokio::test]
async fn test_rotation_skips_invalidated_credentials() -> Result<(), TestError> {
    let setup = test_setup_with_tables!(entity::prelude::Owner, entity::prelude::OwnerCharacter)?;
    let owner = factory::owner(&setup.db, 2001, "Wayne Technologies").await?;
    let alpha = factory::character(&setup.db, owner.id, 95465499, "Bruce Wayne").await?;
    let bravo = factory::character(&setup.db, owner.id, 95465500, "Clark Kent").await?;

    let repo = OwnerRepository::new(&setup.db);
    repo.invalidate_character(alpha.id).await?;

    let picked = repo
        .next_character(owner.id, SyncCycle::Structures)
        .await?
        .unwrap();
    assert_eq!(picked.id, bravo.id);

    repo.invalidate_character(bravo.id).await?;
    let picked = repo.next_character(owner.id, SyncCycle::Structures).await?;
    assert!(picked.is_none());
    assert!(repo.has_invalid_characters(owner.id).await?);

    Ok(())
}
