use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use courses_api::api::routes::create_routes;
use courses_api::config::{AppConfig, DatabaseConfig, DatabaseSeeder, StorageBackend};
use courses_api::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with_ansi(!config.is_production())
        .with_target(!config.is_production())
        .init();

    let store: Arc<dyn Store> = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = DatabaseConfig::from_env()?.create_pool().await?;
            let store = PgStore::new(pool);
            store.run_migrations().await?;
            info!("Connected to Postgres and applied migrations");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    info!(backend = store.backend_name(), "Storage ready");

    if config.seed_demo_data {
        DatabaseSeeder::new(store.clone(), config.max_students_per_course)
            .seed_all()
            .await?;
    }

    let app = create_routes(store, &config);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Courses API starting on http://{} ({})", address, config.environment);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
