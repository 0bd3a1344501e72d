//! Cron scheduler driving the periodic sync and forwarding pipeline.
//!
//! The job list is an explicit configuration assembled at process start:
//! each entry names a cron expression, a label, and the function that turns
//! database state into queued worker jobs. There is no ambient job registry.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::Error, worker::WorkerQueue};

pub mod config;
pub mod jobs;
pub mod schedule;

/// Job scheduler for the background sync pipeline.
pub struct Scheduler {
    db: DatabaseConnection,
    queue: WorkerQueue,
    sched: JobScheduler,
}

impl Scheduler {
    pub async fn new(db: DatabaseConnection, queue: WorkerQueue) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, queue, sched })
    }

    /// Register every periodic job and start the scheduler.
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            config::structures::CRON_EXPRESSION,
            "structure sync",
            jobs::schedule_structure_updates,
        )
        .await?;

        self.schedule_job(
            config::notifications::CRON_EXPRESSION,
            "notification fetch",
            jobs::schedule_notification_fetches,
        )
        .await?;

        self.schedule_job(
            config::assets::CRON_EXPRESSION,
            "asset sync",
            jobs::schedule_asset_updates,
        )
        .await?;

        self.schedule_job(
            config::forwarding::CRON_EXPRESSION,
            "forwarding pass",
            jobs::schedule_forwarding_passes,
        )
        .await?;

        self.schedule_job(
            config::fuel_alerts::CRON_EXPRESSION,
            "fuel alert check",
            jobs::schedule_fuel_checks,
        )
        .await?;

        self.schedule_job(
            config::service_status::CRON_EXPRESSION,
            "service status check",
            jobs::schedule_status_check,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Register one recurring job.
    ///
    /// The function receives clones of the database connection and worker
    /// queue, and returns how many worker jobs it queued.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection, WorkerQueue) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let queue = self.queue.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let queue = queue.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db, queue).await {
                        Ok(count) => tracing::debug!("Scheduled {count} {name} job(s)"),
                        Err(e) => tracing::error!("Error scheduling {name} jobs: {e:?}"),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
