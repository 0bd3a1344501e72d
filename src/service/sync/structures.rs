//! The structure sync cycle.
//!
//! Fetches the owner's full structure set from ESI, enriches each structure
//! with its name and solar system, and replaces the stored set in a single
//! transaction. Enrichment failures degrade to placeholder data instead of
//! dropping rows, and deletions only happen within a category whose listing
//! fetch completed.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait};

use crate::{
    constant::{EVE_TYPE_ID_POCO, STRUCTURE_NAME_PLACEHOLDER},
    data::{
        fuel_alert::FuelAlertRepository,
        notification::NotificationRepository,
        owner::{OwnerRepository, SyncCycle},
        structure::StructureRepository,
    },
    error::Error,
    esi::model::EsiSolarSystem,
    model::app::AppState,
    service::sync::with_esi_retries,
};

/// One enriched structure ready to be stored, with its service list.
struct PreparedStructure {
    row: entity::structure::ActiveModel,
    services: Vec<(String, String)>,
}

pub async fn update_structures(state: &AppState, owner_id: i32) -> Result<(), Error> {
    let owner_repo = OwnerRepository::new(&state.db);
    let Some(owner) = owner_repo.find_by_id(owner_id).await? else {
        tracing::warn!("Structure sync requested for unknown owner {owner_id}");
        return Ok(());
    };
    if !owner.is_active {
        return Ok(());
    }

    // Rotate to the next valid credential; invalid ones are skipped and
    // marked so the health monitor can flag the owner.
    let (character, listed) = loop {
        let Some(character) = owner_repo.next_character(owner.id, SyncCycle::Structures).await?
        else {
            tracing::error!(
                "Owner {} has no valid credentials left, deactivating",
                owner.corporation_name
            );
            owner_repo.deactivate(owner.id).await?;
            return Ok(());
        };

        // Structure endpoints require the Station Manager role; a character
        // that lost it fails every call, so verify up front.
        let roles = with_esi_retries(&state.settings, || {
            state
                .esi_client
                .character_roles(character.character_id, &character.token)
        })
        .await;
        match roles {
            Ok(roles) if !roles.has_station_manager() => {
                tracing::warn!(
                    "Character {} no longer has the Station Manager role",
                    character.character_name
                );
                owner_repo.invalidate_character(character.id).await?;
                continue;
            }
            Ok(_) => {}
            Err(Error::EsiError(err)) if err.is_unauthorized() => {
                tracing::warn!(
                    "Credential for character {} is no longer valid: {err}",
                    character.character_name
                );
                owner_repo.invalidate_character(character.id).await?;
                continue;
            }
            Err(err) => return Err(err),
        }

        let result = with_esi_retries(&state.settings, || {
            state.esi_client.corporation_structures(
                owner.corporation_id,
                character.character_id,
                &character.token,
            )
        })
        .await;

        match result {
            Ok(listed) => break (character, listed),
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

    let structure_repo = StructureRepository::new(&state.db);
    let existing: HashMap<i64, entity::structure::Model> = structure_repo
        .get_by_owner(owner.id)
        .await?
        .into_iter()
        .map(|row| (row.id, row))
        .collect();

    let now = Utc::now().naive_utc();
    let mut system_cache: HashMap<i64, EsiSolarSystem> = HashMap::new();
    let mut prepared: Vec<PreparedStructure> = Vec::new();
    let mut refueled: Vec<i64> = Vec::new();

    for esi_structure in &listed {
        let old = existing.get(&esi_structure.structure_id);

        // Enrichment is per structure and its failure must not fail the
        // cycle: fall back to the previous or placeholder values.
        let detail = with_esi_retries(&state.settings, || {
            state.esi_client.universe_structure(
                esi_structure.structure_id,
                character.character_id,
                &character.token,
            )
        })
        .await;

        let (name, solar_system_id) = match detail {
            Ok(detail) => (detail.name, detail.solar_system_id),
            Err(err) => {
                tracing::warn!(
                    "Failed to enrich structure {}, storing placeholder: {err}",
                    esi_structure.structure_id
                );
                match old {
                    Some(old) => (old.name.clone(), old.solar_system_id),
                    None => (STRUCTURE_NAME_PLACEHOLDER.to_string(), esi_structure.system_id),
                }
            }
        };

        let system = solar_system(state, &mut system_cache, solar_system_id).await;
        let (system_name, system_security) = match (&system, old) {
            (Some(system), _) => (system.name.clone(), system.security_status),
            (None, Some(old)) => (old.solar_system_name.clone(), old.solar_system_security),
            (None, None) => ("?".to_string(), 0.0),
        };

        let fuel_expires_at = esi_structure.fuel_expires.map(|dt| dt.naive_utc());

        // last_online_at is monotonically informative: a fueled structure is
        // online right now, otherwise keep whatever was known before.
        let last_online_at = if matches!(esi_structure.fuel_expires, Some(expires) if expires.naive_utc() > now)
        {
            Some(now)
        } else {
            old.and_then(|old| old.last_online_at)
        };

        if let Some(old) = old {
            if let (Some(old_fuel), Some(new_fuel)) = (old.fuel_expires_at, fuel_expires_at) {
                if new_fuel > old_fuel {
                    refueled.push(esi_structure.structure_id);
                }
            }
        }

        let type_name = old
            .map(|old| old.type_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Type {}", esi_structure.type_id));

        prepared.push(PreparedStructure {
            row: entity::structure::ActiveModel {
                id: ActiveValue::Set(esi_structure.structure_id),
                owner_id: ActiveValue::Set(owner.id),
                name: ActiveValue::Set(name),
                eve_type_id: ActiveValue::Set(esi_structure.type_id),
                type_name: ActiveValue::Set(type_name),
                solar_system_id: ActiveValue::Set(solar_system_id),
                solar_system_name: ActiveValue::Set(system_name),
                solar_system_security: ActiveValue::Set(system_security),
                category: ActiveValue::Set("upwell".to_string()),
                state: ActiveValue::Set(esi_structure.state.clone()),
                fuel_expires_at: ActiveValue::Set(fuel_expires_at),
                last_online_at: ActiveValue::Set(last_online_at),
                state_timer_start: ActiveValue::Set(
                    esi_structure.state_timer_start.map(|dt| dt.naive_utc()),
                ),
                state_timer_end: ActiveValue::Set(
                    esi_structure.state_timer_end.map(|dt| dt.naive_utc()),
                ),
                unanchors_at: ActiveValue::Set(esi_structure.unanchors_at.map(|dt| dt.naive_utc())),
                reinforce_hour: ActiveValue::Set(esi_structure.reinforce_hour),
                created_at: ActiveValue::Set(old.map(|old| old.created_at).unwrap_or(now)),
                last_updated_at: ActiveValue::Set(now),
            },
            services: esi_structure
                .services
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|service| (service.name.clone(), service.state.clone()))
                .collect(),
        });
    }

    // Upwell listing completed, so upwell rows absent from it are gone.
    let mut removed: Vec<i64> = existing
        .values()
        .filter(|row| row.category == "upwell")
        .map(|row| row.id)
        .filter(|id| !listed.iter().any(|s| s.structure_id == *id))
        .collect();

    if state.settings.feature_customs_offices {
        match sync_customs_offices(state, &owner, &character, &existing, &mut system_cache).await {
            Ok((mut rows, mut gone)) => {
                prepared.append(&mut rows);
                removed.append(&mut gone);
            }
            Err(err) => {
                // A failed listing must not delete rows of its category.
                tracing::warn!("Customs office sync failed for owner {owner_id}: {err}");
            }
        }
    }
    if state.settings.feature_starbases {
        match sync_starbases(state, &owner, &character, &existing, &mut system_cache).await {
            Ok((mut rows, mut gone)) => {
                prepared.append(&mut rows);
                removed.append(&mut gone);
            }
            Err(err) => {
                tracing::warn!("Starbase sync failed for owner {owner_id}: {err}");
            }
        }
    }

    let rows: Vec<entity::structure::ActiveModel> =
        prepared.iter().map(|p| p.row.clone()).collect();
    let services: Vec<(i64, Vec<(String, String)>)> = prepared
        .iter()
        .map(|p| {
            let id = match &p.row.id {
                ActiveValue::Set(id) => *id,
                _ => 0,
            };
            (id, p.services.clone())
        })
        .collect();

    state
        .db
        .transaction::<_, (), sea_orm::DbErr>(|txn| {
            Box::pin(async move {
                let repo = StructureRepository::new(txn);
                repo.upsert_many(rows).await?;
                repo.delete_by_ids(&removed).await?;
                for (structure_id, services) in &services {
                    repo.replace_services(*structure_id, services).await?;
                }
                Ok(())
            })
        })
        .await
        .map_err(|err| match err {
            sea_orm::TransactionError::Connection(e) => Error::DbErr(e),
            sea_orm::TransactionError::Transaction(e) => Error::DbErr(e),
        })?;

    if state.settings.feature_refueled_notifications && !refueled.is_empty() {
        emit_refueled_notifications(state, owner.id, &refueled).await?;
    }

    owner_repo
        .update_liveness(owner.id, SyncCycle::Structures)
        .await?;
    tracing::info!(
        "Synced {} structure(s) for owner {}",
        prepared.len(),
        owner.corporation_name
    );

    Ok(())
}

async fn solar_system(
    state: &AppState,
    cache: &mut HashMap<i64, EsiSolarSystem>,
    system_id: i64,
) -> Option<EsiSolarSystem> {
    if let Some(system) = cache.get(&system_id) {
        return Some(system.clone());
    }
    match with_esi_retries(&state.settings, || state.esi_client.solar_system(system_id)).await {
        Ok(system) => {
            cache.insert(system_id, system.clone());
            Some(system)
        }
        Err(err) => {
            tracing::warn!("Failed to resolve solar system {system_id}: {err}");
            None
        }
    }
}

async fn sync_customs_offices(
    state: &AppState,
    owner: &entity::owner::Model,
    character: &entity::owner_character::Model,
    existing: &HashMap<i64, entity::structure::Model>,
    system_cache: &mut HashMap<i64, EsiSolarSystem>,
) -> Result<(Vec<PreparedStructure>, Vec<i64>), Error> {
    let offices = with_esi_retries(&state.settings, || {
        state.esi_client.corporation_customs_offices(
            owner.corporation_id,
            character.character_id,
            &character.token,
        )
    })
    .await?;

    let now = Utc::now().naive_utc();
    let mut prepared = Vec::new();
    for office in &offices {
        let old = existing.get(&office.office_id);
        let system = solar_system(state, system_cache, office.system_id).await;
        let (system_name, system_security) = match (&system, old) {
            (Some(system), _) => (system.name.clone(), system.security_status),
            (None, Some(old)) => (old.solar_system_name.clone(), old.solar_system_security),
            (None, None) => ("?".to_string(), 0.0),
        };

        prepared.push(PreparedStructure {
            row: entity::structure::ActiveModel {
                id: ActiveValue::Set(office.office_id),
                owner_id: ActiveValue::Set(owner.id),
                name: ActiveValue::Set(format!("Customs Office ({system_name})")),
                eve_type_id: ActiveValue::Set(EVE_TYPE_ID_POCO),
                type_name: ActiveValue::Set("Customs Office".to_string()),
                solar_system_id: ActiveValue::Set(office.system_id),
                solar_system_name: ActiveValue::Set(system_name),
                solar_system_security: ActiveValue::Set(system_security),
                category: ActiveValue::Set("poco".to_string()),
                state: ActiveValue::Set("unknown".to_string()),
                fuel_expires_at: ActiveValue::Set(None),
                last_online_at: ActiveValue::Set(old.and_then(|old| old.last_online_at)),
                state_timer_start: ActiveValue::Set(None),
                state_timer_end: ActiveValue::Set(None),
                unanchors_at: ActiveValue::Set(None),
                reinforce_hour: ActiveValue::Set(office.reinforce_exit_start),
                created_at: ActiveValue::Set(old.map(|old| old.created_at).unwrap_or(now)),
                last_updated_at: ActiveValue::Set(now),
            },
            services: Vec::new(),
        });
    }

    let removed = existing
        .values()
        .filter(|row| row.category == "poco")
        .map(|row| row.id)
        .filter(|id| !offices.iter().any(|office| office.office_id == *id))
        .collect();

    Ok((prepared, removed))
}

async fn sync_starbases(
    state: &AppState,
    owner: &entity::owner::Model,
    character: &entity::owner_character::Model,
    existing: &HashMap<i64, entity::structure::Model>,
    system_cache: &mut HashMap<i64, EsiSolarSystem>,
) -> Result<(Vec<PreparedStructure>, Vec<i64>), Error> {
    let starbases = with_esi_retries(&state.settings, || {
        state.esi_client.corporation_starbases(
            owner.corporation_id,
            character.character_id,
            &character.token,
        )
    })
    .await?;

    let now = Utc::now().naive_utc();
    let mut prepared = Vec::new();
    for starbase in &starbases {
        let old = existing.get(&starbase.starbase_id);
        let system = solar_system(state, system_cache, starbase.system_id).await;
        let (system_name, system_security) = match (&system, old) {
            (Some(system), _) => (system.name.clone(), system.security_status),
            (None, Some(old)) => (old.solar_system_name.clone(), old.solar_system_security),
            (None, None) => ("?".to_string(), 0.0),
        };

        prepared.push(PreparedStructure {
            row: entity::structure::ActiveModel {
                id: ActiveValue::Set(starbase.starbase_id),
                owner_id: ActiveValue::Set(owner.id),
                name: ActiveValue::Set(format!("Starbase ({system_name})")),
                eve_type_id: ActiveValue::Set(starbase.type_id),
                type_name: ActiveValue::Set("Starbase".to_string()),
                solar_system_id: ActiveValue::Set(starbase.system_id),
                solar_system_name: ActiveValue::Set(system_name),
                solar_system_security: ActiveValue::Set(system_security),
                category: ActiveValue::Set("starbase".to_string()),
                state: ActiveValue::Set(starbase.state.clone()),
                fuel_expires_at: ActiveValue::Set(None),
                last_online_at: ActiveValue::Set(old.and_then(|old| old.last_online_at)),
                state_timer_start: ActiveValue::Set(None),
                state_timer_end: ActiveValue::Set(
                    starbase.reinforced_until.map(|dt| dt.naive_utc()),
                ),
                unanchors_at: ActiveValue::Set(starbase.unanchor_at.map(|dt| dt.naive_utc())),
                reinforce_hour: ActiveValue::Set(None),
                created_at: ActiveValue::Set(old.map(|old| old.created_at).unwrap_or(now)),
                last_updated_at: ActiveValue::Set(now),
            },
            services: Vec::new(),
        });
    }

    let removed = existing
        .values()
        .filter(|row| row.category == "starbase")
        .map(|row| row.id)
        .filter(|id| !starbases.iter().any(|starbase| starbase.starbase_id == *id))
        .collect();

    Ok((prepared, removed))
}

/// Emit a refueled notification per structure and reset its alert markers
/// so the next depletion can alert again.
async fn emit_refueled_notifications(
    state: &AppState,
    owner_id: i32,
    structure_ids: &[i64],
) -> Result<(), Error> {
    let notification_repo = NotificationRepository::new(&state.db);
    let fuel_alert_repo = FuelAlertRepository::new(&state.db);
    let structure_repo = StructureRepository::new(&state.db);

    for structure_id in structure_ids {
        fuel_alert_repo.clear_for_structure(*structure_id).await?;

        let notif_type = match structure_repo.find_by_id(*structure_id).await? {
            Some(structure) if structure.category == "starbase" => "TowerRefueledExtra",
            _ => "StructureRefueledExtra",
        };
        notification_repo
            .create_generated(
                owner_id,
                notif_type,
                Some(format!("structureID: {structure_id}\n")),
            )
            .await?;
    }
    Ok(())
}
