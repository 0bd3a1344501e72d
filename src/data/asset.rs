use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::esi::model::EsiAsset;

pub struct AssetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AssetRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replace the owner's asset rows with the list from ESI. Items no
    /// longer present are deleted, the rest upserted on item_id.
    pub async fn replace_for_owner(
        &self,
        owner_id: i32,
        assets: &[EsiAsset],
    ) -> Result<(), DbErr> {
        let incoming_ids = assets.iter().map(|asset| asset.item_id).collect::<Vec<_>>();

        let mut delete = entity::prelude::OwnerAsset::delete_many()
            .filter(entity::owner_asset::Column::OwnerId.eq(owner_id));
        if !incoming_ids.is_empty() {
            delete = delete
                .filter(entity::owner_asset::Column::ItemId.is_not_in(incoming_ids.iter().copied()));
        }
        delete.exec(self.db).await?;

        if assets.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let rows = assets
            .iter()
            .map(|asset| entity::owner_asset::ActiveModel {
                item_id: ActiveValue::Set(asset.item_id),
                owner_id: ActiveValue::Set(owner_id),
                eve_type_id: ActiveValue::Set(asset.type_id),
                location_id: ActiveValue::Set(asset.location_id),
                location_flag: ActiveValue::Set(asset.location_flag.clone()),
                quantity: ActiveValue::Set(asset.quantity),
                last_updated_at: ActiveValue::Set(now),
            })
            .collect::<Vec<_>>();

        entity::prelude::OwnerAsset::insert_many(rows)
            .on_conflict(
                OnConflict::column(entity::owner_asset::Column::ItemId)
                    .update_columns([
                        entity::owner_asset::Column::OwnerId,
                        entity::owner_asset::Column::EveTypeId,
                        entity::owner_asset::Column::LocationId,
                        entity::owner_asset::Column::LocationFlag,
                        entity::owner_asset::Column::Quantity,
                        entity::owner_asset::Column::LastUpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Total quantity of one item type located in a structure.
    pub async fn quantity_at(
        &self,
        location_id: i64,
        eve_type_id: i64,
    ) -> Result<i64, DbErr> {
        let rows = entity::prelude::OwnerAsset::find()
            .filter(entity::owner_asset::Column::LocationId.eq(location_id))
            .filter(entity::owner_asset::Column::EveTypeId.eq(eve_type_id))
            .all(self.db)
            .await?;
        Ok(rows.iter().map(|row| row.quantity).sum())
    }
}
