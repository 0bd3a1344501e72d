use structwatch::{
    config::Config, model::app::AppState, router, scheduler::Scheduler, startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let esi_client = startup::build_esi_client(&config).unwrap();
    let db = startup::connect_to_database(&config).await.unwrap();

    let state = AppState {
        db: db.clone(),
        esi_client,
        settings: config.settings.clone(),
    };

    let worker = startup::start_workers(&config, state.clone()).await.unwrap();

    let scheduler = Scheduler::new(db, worker.queue.clone()).await.unwrap();
    scheduler.start().await.unwrap();

    tracing::info!("Starting server on {}", config.bind_address);

    let app = router::routes().with_state(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .unwrap();

    if let Err(e) = worker.pool.stop().await {
        tracing::error!("Error stopping worker pool: {e}");
    }
}
