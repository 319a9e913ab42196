use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{
    AppState,
    config::{ServerConfig, StorageBackend},
    create_router,
};
use auth::{TokenConfig, TokenService};
use common::database::{DatabaseConfig, apply_schema, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting clinic appointments service");

    let config = ServerConfig::from_env()?;
    let tokens = TokenService::new(TokenConfig::from_env()?);

    let app_state = match config.storage {
        StorageBackend::Memory => AppState::in_memory(&config.appointment_types, tokens),
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            apply_schema(&pool).await?;
            AppState::postgres(pool, &config.appointment_types, tokens).await?
        }
    };

    info!("Using {} storage", config.storage);

    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Clinic appointments service listening on {}", config.bind_address());

    axum::serve(listener, app).await?;

    Ok(())
}
