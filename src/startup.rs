//! Process startup wiring.
//!
//! Each function builds one piece of the runtime: the ESI client, the
//! database connection (with migrations), and the background worker stack.
//! `main` composes them and starts the scheduler and HTTP server.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{
    config::Config,
    error::Error,
    esi::EsiClient,
    model::app::AppState,
    service::{
        timer::{HttpTimerSink, TimerSink},
        webhook::WebhookDispatcher,
    },
    worker::{handler::WorkerJobHandler, Worker, WorkerQueue},
};

/// Build and configure the ESI client.
pub fn build_esi_client(config: &Config) -> Result<EsiClient, Error> {
    let user_agent = format!(
        "structwatch/{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.contact_email
    );

    let esi_client = EsiClient::new(
        &config.esi_base_url,
        &user_agent,
        config.settings.request_timeout,
    )?;

    Ok(esi_client)
}

/// Connect to the database and run migrations.
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the worker queue, job handler, and pool, and start the dispatchers.
pub async fn start_workers(config: &Config, state: AppState) -> Result<Worker, Error> {
    let dispatcher = WebhookDispatcher::new(config.settings.request_timeout)?;

    let timer_sink: Option<Arc<dyn TimerSink>> = match &config.timers_url {
        Some(url) => Some(Arc::new(HttpTimerSink::new(
            url,
            config.settings.request_timeout,
        )?)),
        None => {
            tracing::info!("TIMERS_URL not set, timers from notifications are disabled");
            None
        }
    };

    let queue = WorkerQueue::new();
    let handler = WorkerJobHandler::new(
        state,
        dispatcher,
        timer_sink,
        config.admin_webhook_url.clone(),
        queue.clone(),
    );

    let worker = Worker::new(
        config.settings.max_concurrent_jobs,
        config.settings.job_time_limit,
        queue,
        handler,
    );
    worker.pool.start().await?;

    Ok(worker)
}
