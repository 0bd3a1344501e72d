use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct WebhookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WebhookRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, webhook_id: i32) -> Result<Option<entity::webhook::Model>, DbErr> {
        entity::prelude::Webhook::find_by_id(webhook_id)
            .one(self.db)
            .await
    }

    pub async fn get_active(&self) -> Result<Vec<entity::webhook::Model>, DbErr> {
        entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::IsActive.eq(true))
            .all(self.db)
            .await
    }

    /// Active webhooks assigned to an owner.
    pub async fn get_for_owner(&self, owner_id: i32) -> Result<Vec<entity::webhook::Model>, DbErr> {
        let assignments = entity::prelude::OwnerWebhook::find()
            .filter(entity::owner_webhook::Column::OwnerId.eq(owner_id))
            .all(self.db)
            .await?;
        let ids = assignments
            .iter()
            .map(|row| row.webhook_id)
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::Id.is_in(ids))
            .filter(entity::webhook::Column::IsActive.eq(true))
            .all(self.db)
            .await
    }

    /// Active webhooks assigned directly to a structure. A non-empty result
    /// replaces the owner's webhook set for that structure.
    pub async fn get_for_structure(
        &self,
        structure_id: i64,
    ) -> Result<Vec<entity::webhook::Model>, DbErr> {
        let assignments = entity::prelude::StructureWebhook::find()
            .filter(entity::structure_webhook::Column::StructureId.eq(structure_id))
            .all(self.db)
            .await?;
        let ids = assignments
            .iter()
            .map(|row| row.webhook_id)
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::Id.is_in(ids))
            .filter(entity::webhook::Column::IsActive.eq(true))
            .all(self.db)
            .await
    }

    /// Assign every default webhook to a newly created owner.
    pub async fn assign_defaults(&self, owner_id: i32) -> Result<(), DbErr> {
        let defaults = entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::IsDefault.eq(true))
            .all(self.db)
            .await?;

        for webhook in defaults {
            let existing = entity::prelude::OwnerWebhook::find()
                .filter(entity::owner_webhook::Column::OwnerId.eq(owner_id))
                .filter(entity::owner_webhook::Column::WebhookId.eq(webhook.id))
                .one(self.db)
                .await?;
            if existing.is_none() {
                let row = entity::owner_webhook::ActiveModel {
                    id: ActiveValue::NotSet,
                    owner_id: ActiveValue::Set(owner_id),
                    webhook_id: ActiveValue::Set(webhook.id),
                };
                entity::prelude::OwnerWebhook::insert(row).exec(self.db).await?;
            }
        }
        Ok(())
    }

    /// Owner IDs whose notifications can target this webhook, either via a
    /// direct owner assignment or via one of the owner's structures.
    pub async fn owner_ids(&self, webhook_id: i32) -> Result<Vec<i32>, DbErr> {
        let assignments = entity::prelude::OwnerWebhook::find()
            .filter(entity::owner_webhook::Column::WebhookId.eq(webhook_id))
            .all(self.db)
            .await?;
        let mut owner_ids: Vec<i32> = assignments.into_iter().map(|row| row.owner_id).collect();

        let structure_ids: Vec<i64> = entity::prelude::StructureWebhook::find()
            .filter(entity::structure_webhook::Column::WebhookId.eq(webhook_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| row.structure_id)
            .collect();
        if !structure_ids.is_empty() {
            let structures = entity::prelude::Structure::find()
                .filter(entity::structure::Column::Id.is_in(structure_ids))
                .all(self.db)
                .await?;
            owner_ids.extend(structures.into_iter().map(|row| row.owner_id));
        }

        owner_ids.sort_unstable();
        owner_ids.dedup();
        Ok(owner_ids)
    }
}

/// Parse the stored JSON array of enabled notification type strings.
pub fn enabled_types(webhook: &entity::webhook::Model) -> Vec<String> {
    webhook
        .notification_types
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
