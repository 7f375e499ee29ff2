mod config;
mod error;
mod handlers;
mod routes;
mod scheduler;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::routes::create_app;
use crate::scheduler::RecurringEventScheduler;
use crate::state::AppState;
use crate::store::EventStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;
    let public_config = config.load_public_config()?;

    tracing::info!("Starting Timeful backend server");
    tracing::debug!("Enabled features: {:?}", public_config.features());

    let store = EventStore::new();

    // Start recurring event scheduler
    let scheduler = RecurringEventScheduler::new(
        store.clone(),
        Duration::from_secs(config.recurrence_check_interval_seconds),
    );
    let scheduler_handle = tokio::spawn(async move {
        if let Err(e) = scheduler.run().await {
            tracing::error!("Scheduler error: {:?}", e);
        }
    });

    let app = create_app(AppState::new(store, public_config));

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received, stopping...");
        })
        .await?;

    scheduler_handle.abort();
    tracing::info!("Server stopped");

    Ok(())
}
