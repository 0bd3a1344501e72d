//! The asset sync cycle, feeding jump gate fuel level checks.

use crate::{
    data::{
        asset::AssetRepository,
        owner::{OwnerRepository, SyncCycle},
    },
    error::Error,
    model::app::AppState,
    service::sync::with_esi_retries,
};

pub async fn update_assets(state: &AppState, owner_id: i32) -> Result<(), Error> {
    let owner_repo = OwnerRepository::new(&state.db);
    let Some(owner) = owner_repo.find_by_id(owner_id).await? else {
        tracing::warn!("Asset sync requested for unknown owner {owner_id}");
        return Ok(());
    };
    if !owner.is_active {
        return Ok(());
    }

    let assets = loop {
        let Some(character) = owner_repo.next_character(owner.id, SyncCycle::Assets).await?
        else {
            tracing::error!(
                "Owner {} has no valid credentials left, deactivating",
                owner.corporation_name
            );
            owner_repo.deactivate(owner.id).await?;
            return Ok(());
        };

        let result = with_esi_retries(&state.settings, || {
            state.esi_client.corporation_assets(
                owner.corporation_id,
                character.character_id,
                &character.token,
            )
        })
        .await;

        match result {
            Ok(assets) => break assets,
            Err(Error::EsiError(err)) if err.is_unauthorized() => {
                tracing::warn!(
                    "Credential for character {} is no longer valid: {err}",
                    character.character_name
                );
                owner_repo.invalidate_character(character.id).await?;
            }
            Err(err) => return Err(err),
        }
    };

    let count = assets.len();
    AssetRepository::new(&state.db)
        .replace_for_owner(owner.id, &assets)
        .await?;

    owner_repo.update_liveness(owner.id, SyncCycle::Assets).await?;
    tracing::info!(
        "Synced {count} asset(s) for owner {}",
        owner.corporation_name
    );

    Ok(())
}
