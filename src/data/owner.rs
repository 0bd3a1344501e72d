use chrono::Utc;
use sea_orm::{
    sea_query::NullOrdering, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    Order, QueryFilter, QueryOrder,
};

pub struct OwnerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

/// Which sync cycle a liveness timestamp or rotation cursor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCycle {
    Structures,
    Notifications,
    Assets,
}

impl<'a, C: ConnectionTrait> OwnerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, owner_id: i32) -> Result<Option<entity::owner::Model>, DbErr> {
        entity::prelude::Owner::find_by_id(owner_id).one(self.db).await
    }

    pub async fn get_active(&self) -> Result<Vec<entity::owner::Model>, DbErr> {
        entity::prelude::Owner::find()
            .filter(entity::owner::Column::IsActive.eq(true))
            .all(self.db)
            .await
    }

    /// Advance the liveness timestamp for one cycle. Called only after the
    /// cycle succeeded; failures leave the timestamp untouched so the health
    /// monitor eventually flags the owner.
    pub async fn update_liveness(&self, owner_id: i32, cycle: SyncCycle) -> Result<(), DbErr> {
        let now = Utc::now().naive_utc();
        let mut owner = entity::owner::ActiveModel {
            id: ActiveValue::Unchanged(owner_id),
            ..Default::default()
        };
        match cycle {
            SyncCycle::Structures => {
                owner.structures_last_update_at = ActiveValue::Set(Some(now));
            }
            SyncCycle::Notifications => {
                owner.notifications_last_update_at = ActiveValue::Set(Some(now));
            }
            SyncCycle::Assets => {
                owner.assets_last_update_at = ActiveValue::Set(Some(now));
            }
        }
        entity::prelude::Owner::update(owner).exec(self.db).await?;
        Ok(())
    }

    pub async fn update_forwarding_liveness(&self, owner_id: i32) -> Result<(), DbErr> {
        let owner = entity::owner::ActiveModel {
            id: ActiveValue::Unchanged(owner_id),
            forwarding_last_update_at: ActiveValue::Set(Some(Utc::now().naive_utc())),
            ..Default::default()
        };
        entity::prelude::Owner::update(owner).exec(self.db).await?;
        Ok(())
    }

    /// Record the last health state reported for this owner, used to make
    /// up/down notices edge triggered.
    pub async fn set_is_up(&self, owner_id: i32, is_up: bool) -> Result<(), DbErr> {
        let owner = entity::owner::ActiveModel {
            id: ActiveValue::Unchanged(owner_id),
            is_up: ActiveValue::Set(Some(is_up)),
            ..Default::default()
        };
        entity::prelude::Owner::update(owner).exec(self.db).await?;
        Ok(())
    }

    pub async fn deactivate(&self, owner_id: i32) -> Result<(), DbErr> {
        let owner = entity::owner::ActiveModel {
            id: ActiveValue::Unchanged(owner_id),
            is_active: ActiveValue::Set(false),
            ..Default::default()
        };
        entity::prelude::Owner::update(owner).exec(self.db).await?;
        Ok(())
    }

    /// Pick the least recently used valid character for a cycle and stamp
    /// its cursor, advancing the rotation.
    ///
    /// Each cycle has its own cursor column and the worker queue never runs
    /// the same (owner, cycle) pair concurrently, so no extra locking is
    /// needed here.
    pub async fn next_character(
        &self,
        owner_id: i32,
        cycle: SyncCycle,
    ) -> Result<Option<entity::owner_character::Model>, DbErr> {
        let cursor_column = match cycle {
            SyncCycle::Structures => entity::owner_character::Column::StructuresLastUsedAt,
            SyncCycle::Notifications => entity::owner_character::Column::NotificationsLastUsedAt,
            SyncCycle::Assets => entity::owner_character::Column::AssetsLastUsedAt,
        };

        let character = entity::prelude::OwnerCharacter::find()
            .filter(entity::owner_character::Column::OwnerId.eq(owner_id))
            .filter(entity::owner_character::Column::IsValid.eq(true))
            .order_by_with_nulls(cursor_column, Order::Asc, NullOrdering::First)
            .order_by(entity::owner_character::Column::Id, Order::Asc)
            .one(self.db)
            .await?;

        let Some(character) = character else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut update = entity::owner_character::ActiveModel {
            id: ActiveValue::Unchanged(character.id),
            ..Default::default()
        };
        match cycle {
            SyncCycle::Structures => update.structures_last_used_at = ActiveValue::Set(Some(now)),
            SyncCycle::Notifications => {
                update.notifications_last_used_at = ActiveValue::Set(Some(now))
            }
            SyncCycle::Assets => update.assets_last_used_at = ActiveValue::Set(Some(now)),
        }
        entity::prelude::OwnerCharacter::update(update)
            .exec(self.db)
            .await?;

        Ok(Some(character))
    }

    /// Mark a credential invalid. The row is kept so administrators can see
    /// which character needs to be re-added.
    pub async fn invalidate_character(&self, character_row_id: i32) -> Result<(), DbErr> {
        let update = entity::owner_character::ActiveModel {
            id: ActiveValue::Unchanged(character_row_id),
            is_valid: ActiveValue::Set(false),
            ..Default::default()
        };
        entity::prelude::OwnerCharacter::update(update)
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn valid_characters(
        &self,
        owner_id: i32,
    ) -> Result<Vec<entity::owner_character::Model>, DbErr> {
        entity::prelude::OwnerCharacter::find()
            .filter(entity::owner_character::Column::OwnerId.eq(owner_id))
            .filter(entity::owner_character::Column::IsValid.eq(true))
            .all(self.db)
            .await
    }

    pub async fn has_invalid_characters(&self, owner_id: i32) -> Result<bool, DbErr> {
        let invalid = entity::prelude::OwnerCharacter::find()
            .filter(entity::owner_character::Column::OwnerId.eq(owner_id))
            .filter(entity::owner_character::Column::IsValid.eq(false))
            .one(self.db)
            .await?;
        Ok(invalid.is_some())
    }
}
