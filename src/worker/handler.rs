//! Job execution: dispatches each queued job to the matching service.

use std::sync::Arc;

use crate::{
    data::webhook::WebhookRepository,
    error::Error,
    model::{app::AppState, worker::WorkerJob},
    service::{
        fuel, status,
        sync::{assets, notifications, structures},
        timer::TimerSink,
        webhook::{forward, WebhookDispatcher},
    },
    worker::queue::WorkerQueue,
};

pub struct WorkerJobHandler {
    state: AppState,
    dispatcher: WebhookDispatcher,
    timer_sink: Option<Arc<dyn TimerSink>>,
    admin_webhook_url: Option<String>,
    queue: WorkerQueue,
}

impl WorkerJobHandler {
    pub fn new(
        state: AppState,
        dispatcher: WebhookDispatcher,
        timer_sink: Option<Arc<dyn TimerSink>>,
        admin_webhook_url: Option<String>,
        queue: WorkerQueue,
    ) -> Self {
        Self {
            state,
            dispatcher,
            timer_sink,
            admin_webhook_url,
            queue,
        }
    }

    pub async fn handle(&self, job: &WorkerJob) -> Result<(), Error> {
        match job {
            WorkerJob::UpdateStructures { owner_id } => {
                structures::update_structures(&self.state, *owner_id).await
            }
            WorkerJob::FetchNotifications { owner_id } => {
                self.fetch_notifications(*owner_id).await
            }
            WorkerJob::UpdateAssets { owner_id } => {
                assets::update_assets(&self.state, *owner_id).await
            }
            WorkerJob::SendPendingMessages { webhook_id } => {
                forward::send_pending_messages(&self.state, &self.dispatcher, *webhook_id).await
            }
            WorkerJob::CheckFuelAlerts => self.check_fuel_alerts().await,
            WorkerJob::CheckServiceStatus => {
                status::check_service_status(
                    &self.state,
                    &self.dispatcher,
                    self.admin_webhook_url.as_deref(),
                )
                .await
            }
        }
    }

    /// Fetch notifications, then queue forwarding passes for the webhooks
    /// that may now have pending messages and create timers.
    async fn fetch_notifications(&self, owner_id: i32) -> Result<(), Error> {
        let webhook_ids = notifications::fetch_notifications(&self.state, owner_id).await?;
        for webhook_id in webhook_ids {
            self.queue.push(WorkerJob::SendPendingMessages { webhook_id });
        }

        if let Some(sink) = &self.timer_sink {
            if let Err(err) = crate::service::timer::process_timers(
                &self.state,
                sink.as_ref(),
                owner_id,
            )
            .await
            {
                // Timer creation must not block forwarding.
                tracing::error!("Timer processing failed for owner {owner_id}: {err:?}");
            }
        }
        Ok(())
    }

    /// Evaluate fuel alerts, then queue forwarding for every active webhook
    /// so generated alerts go out promptly.
    async fn check_fuel_alerts(&self) -> Result<(), Error> {
        fuel::check_fuel_alerts(&self.state).await?;
        for webhook in WebhookRepository::new(&self.state.db).get_active().await? {
            self.queue.push(WorkerJob::SendPendingMessages {
                webhook_id: webhook.id,
            });
        }
        Ok(())
    }
}
