//! Per-kind scheduling functions run by the cron scheduler.
//!
//! Each function queries the database for the jobs a cycle needs, staggers
//! them across the configured window where appropriate, and queues them.
//! The queue de-duplicates, so a slow cycle is never queued twice.

use sea_orm::DatabaseConnection;

use crate::{
    data::{owner::OwnerRepository, webhook::WebhookRepository},
    error::Error,
    model::worker::WorkerJob,
    scheduler::{config, schedule::create_job_schedule},
    worker::WorkerQueue,
};

pub async fn schedule_structure_updates(
    db: DatabaseConnection,
    queue: WorkerQueue,
) -> Result<usize, Error> {
    let owners = OwnerRepository::new(&db).get_active().await?;
    let jobs = owners
        .iter()
        .map(|owner| WorkerJob::UpdateStructures { owner_id: owner.id })
        .collect();

    let mut scheduled = 0;
    for (job, at) in create_job_schedule(jobs, config::structures::SCHEDULE_INTERVAL) {
        if queue.schedule(job, at) {
            scheduled += 1;
        }
    }
    Ok(scheduled)
}

pub async fn schedule_notification_fetches(
    db: DatabaseConnection,
    queue: WorkerQueue,
) -> Result<usize, Error> {
    let owners = OwnerRepository::new(&db).get_active().await?;
    let jobs = owners
        .iter()
        .map(|owner| WorkerJob::FetchNotifications { owner_id: owner.id })
        .collect();

    let mut scheduled = 0;
    for (job, at) in create_job_schedule(jobs, config::notifications::SCHEDULE_INTERVAL) {
        if queue.schedule(job, at) {
            scheduled += 1;
        }
    }
    Ok(scheduled)
}

pub async fn schedule_asset_updates(
    db: DatabaseConnection,
    queue: WorkerQueue,
) -> Result<usize, Error> {
    let owners = OwnerRepository::new(&db).get_active().await?;
    let jobs = owners
        .iter()
        .map(|owner| WorkerJob::UpdateAssets { owner_id: owner.id })
        .collect();

    let mut scheduled = 0;
    for (job, at) in create_job_schedule(jobs, config::assets::SCHEDULE_INTERVAL) {
        if queue.schedule(job, at) {
            scheduled += 1;
        }
    }
    Ok(scheduled)
}

pub async fn schedule_forwarding_passes(
    db: DatabaseConnection,
    queue: WorkerQueue,
) -> Result<usize, Error> {
    let webhooks = WebhookRepository::new(&db).get_active().await?;
    let mut scheduled = 0;
    for webhook in webhooks {
        if queue.push(WorkerJob::SendPendingMessages {
            webhook_id: webhook.id,
        }) {
            scheduled += 1;
        }
    }
    Ok(scheduled)
}

pub async fn schedule_fuel_checks(
    _db: DatabaseConnection,
    queue: WorkerQueue,
) -> Result<usize, Error> {
    Ok(queue.push(WorkerJob::CheckFuelAlerts) as usize)
}

pub async fn schedule_status_check(
    _db: DatabaseConnection,
    queue: WorkerQueue,
) -> Result<usize, Error> {
    Ok(queue.push(WorkerJob::CheckServiceStatus) as usize)
}
