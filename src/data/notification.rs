use std::collections::HashSet;

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::constant::GENERATED_NOTIFICATION_ID_BASE;

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Game-assigned IDs already stored for this owner, for dedup on fetch.
    pub async fn existing_ids(&self, owner_id: i32) -> Result<HashSet<i64>, DbErr> {
        let ids: Vec<i64> = entity::prelude::Notification::find()
            .select_only()
            .column(entity::notification::Column::NotificationId)
            .filter(entity::notification::Column::OwnerId.eq(owner_id))
            .into_tuple()
            .all(self.db)
            .await?;
        Ok(ids.into_iter().collect())
    }

    pub async fn insert_many(
        &self,
        notifications: Vec<entity::notification::ActiveModel>,
    ) -> Result<(), DbErr> {
        if notifications.is_empty() {
            return Ok(());
        }
        entity::prelude::Notification::insert_many(notifications)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Store a locally generated notification. Negative IDs keep generated
    /// rows out of the game's ID space.
    pub async fn create_generated(
        &self,
        owner_id: i32,
        notif_type: &str,
        text: Option<String>,
    ) -> Result<entity::notification::Model, DbErr> {
        let min_id: Option<i64> = entity::prelude::Notification::find()
            .select_only()
            .column(entity::notification::Column::NotificationId)
            .filter(
                entity::notification::Column::NotificationId.lte(GENERATED_NOTIFICATION_ID_BASE),
            )
            .order_by(entity::notification::Column::NotificationId, Order::Asc)
            .limit(1)
            .into_tuple()
            .one(self.db)
            .await?;

        let notification_id = match min_id {
            Some(id) => id - 1,
            None => GENERATED_NOTIFICATION_ID_BASE,
        };

        let now = Utc::now().naive_utc();
        let row = entity::notification::ActiveModel {
            id: ActiveValue::NotSet,
            owner_id: ActiveValue::Set(owner_id),
            notification_id: ActiveValue::Set(notification_id),
            sender_id: ActiveValue::Set(None),
            notif_type: ActiveValue::Set(notif_type.to_string()),
            text: ActiveValue::Set(text),
            timestamp: ActiveValue::Set(now),
            is_sent: ActiveValue::Set(false),
            is_timer_added: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            last_updated_at: ActiveValue::Set(now),
        };

        let result = entity::prelude::Notification::insert(row)
            .exec(self.db)
            .await?;
        entity::prelude::Notification::find_by_id(result.last_insert_id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("notification just inserted".into()))
    }

    /// Unsent notifications for an owner, oldest first, newer than the
    /// staleness cutoff.
    pub async fn pending_for_owner(
        &self,
        owner_id: i32,
        stale_cutoff: NaiveDateTime,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::OwnerId.eq(owner_id))
            .filter(entity::notification::Column::IsSent.eq(false))
            .filter(entity::notification::Column::Timestamp.gte(stale_cutoff))
            .order_by(entity::notification::Column::Timestamp, Order::Asc)
            .order_by(entity::notification::Column::NotificationId, Order::Asc)
            .all(self.db)
            .await
    }

    /// Unsent notifications not yet added to the timerboard, oldest first.
    pub async fn pending_timers(
        &self,
        owner_id: i32,
        stale_cutoff: NaiveDateTime,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::OwnerId.eq(owner_id))
            .filter(entity::notification::Column::IsTimerAdded.eq(false))
            .filter(entity::notification::Column::Timestamp.gte(stale_cutoff))
            .order_by(entity::notification::Column::Timestamp, Order::Asc)
            .all(self.db)
            .await
    }

    /// Webhook IDs this notification has already been delivered to.
    pub async fn delivered_webhook_ids(&self, row_id: i32) -> Result<HashSet<i32>, DbErr> {
        let ids: Vec<i32> = entity::prelude::NotificationDelivery::find()
            .select_only()
            .column(entity::notification_delivery::Column::WebhookId)
            .filter(entity::notification_delivery::Column::NotificationId.eq(row_id))
            .into_tuple()
            .all(self.db)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Record that this notification was posted to one webhook. The caller
    /// holds the webhook's exclusion key, so the (notification, webhook)
    /// pair cannot be inserted twice.
    pub async fn record_delivery(&self, row_id: i32, webhook_id: i32) -> Result<(), DbErr> {
        let row = entity::notification_delivery::ActiveModel {
            id: ActiveValue::NotSet,
            notification_id: ActiveValue::Set(row_id),
            webhook_id: ActiveValue::Set(webhook_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };
        entity::prelude::NotificationDelivery::insert(row)
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn mark_sent(&self, row_id: i32) -> Result<(), DbErr> {
        let update = entity::notification::ActiveModel {
            id: ActiveValue::Unchanged(row_id),
            is_sent: ActiveValue::Set(true),
            last_updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        entity::prelude::Notification::update(update)
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn mark_timer_added(&self, row_id: i32) -> Result<(), DbErr> {
        let update = entity::notification::ActiveModel {
            id: ActiveValue::Unchanged(row_id),
            is_timer_added: ActiveValue::Set(true),
            last_updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        entity::prelude::Notification::update(update)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
