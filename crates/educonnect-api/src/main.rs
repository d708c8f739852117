mod config;
mod error;
mod routes;

use std::sync::Arc;

use educonnect_core::db::Database;
use educonnect_core::BlobStore;

use config::AppConfig;
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("educonnect_api=info".parse().expect("valid directive"))
                .add_directive("educonnect_core=info".parse().expect("valid directive")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting educonnect-api with config: {:?}", config);

    let db = Arc::new(Database::open(&config.db_path).await?);
    let blobs = Arc::new(BlobStore::open(&config.uploads_dir).await?);

    let state = AppState::new(config, db, blobs);
    let bind_addr = state.config.bind_addr.clone();
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("educonnect-api listening on {}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
