use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

pub struct StructureRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StructureRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        structure_id: i64,
    ) -> Result<Option<entity::structure::Model>, DbErr> {
        entity::prelude::Structure::find_by_id(structure_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<entity::structure::Model>, DbErr> {
        entity::prelude::Structure::find()
            .filter(entity::structure::Column::OwnerId.eq(owner_id))
            .all(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::structure::Model>, DbErr> {
        entity::prelude::Structure::find().all(self.db).await
    }

    /// Insert or update structures keyed on the game-assigned ID. All
    /// mutable columns are overwritten; `created_at` survives conflicts.
    pub async fn upsert_many(
        &self,
        structures: Vec<entity::structure::ActiveModel>,
    ) -> Result<(), DbErr> {
        if structures.is_empty() {
            return Ok(());
        }

        entity::prelude::Structure::insert_many(structures)
            .on_conflict(
                OnConflict::column(entity::structure::Column::Id)
                    .update_columns([
                        entity::structure::Column::OwnerId,
                        entity::structure::Column::Name,
                        entity::structure::Column::EveTypeId,
                        entity::structure::Column::TypeName,
                        entity::structure::Column::SolarSystemId,
                        entity::structure::Column::SolarSystemName,
                        entity::structure::Column::SolarSystemSecurity,
                        entity::structure::Column::Category,
                        entity::structure::Column::State,
                        entity::structure::Column::FuelExpiresAt,
                        entity::structure::Column::LastOnlineAt,
                        entity::structure::Column::StateTimerStart,
                        entity::structure::Column::StateTimerEnd,
                        entity::structure::Column::UnanchorsAt,
                        entity::structure::Column::ReinforceHour,
                        entity::structure::Column::LastUpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Remove structures the owner no longer controls. Dependent rows
    /// (services, alert markers, webhook assignments) cascade via FKs.
    pub async fn delete_by_ids(&self, structure_ids: &[i64]) -> Result<u64, DbErr> {
        if structure_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Structure::delete_many()
            .filter(entity::structure::Column::Id.is_in(structure_ids.iter().copied()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Replace the service list of a structure with the state from ESI.
    pub async fn replace_services(
        &self,
        structure_id: i64,
        services: &[(String, String)],
    ) -> Result<(), DbErr> {
        entity::prelude::StructureService::delete_many()
            .filter(entity::structure_service::Column::StructureId.eq(structure_id))
            .exec(self.db)
            .await?;

        if services.is_empty() {
            return Ok(());
        }

        let rows = services
            .iter()
            .map(|(name, state)| entity::structure_service::ActiveModel {
                id: ActiveValue::NotSet,
                structure_id: ActiveValue::Set(structure_id),
                name: ActiveValue::Set(name.clone()),
                state: ActiveValue::Set(state.clone()),
            })
            .collect::<Vec<_>>();

        entity::prelude::StructureService::insert_many(rows)
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn get_services(
        &self,
        structure_id: i64,
    ) -> Result<Vec<entity::structure_service::Model>, DbErr> {
        entity::prelude::StructureService::find()
            .filter(entity::structure_service::Column::StructureId.eq(structure_id))
            .all(self.db)
            .await
    }
}
