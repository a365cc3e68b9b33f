use anyhow::{Context, Result};
use apigateway::{
    abstract_trait::SeedServiceTrait, config::Config, handler::AppRouter, state::AppState,
};
use dotenv::dotenv;
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("apigateway", config.otel_endpoint.clone());

    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize log exporter")?;
    telemetry
        .init_meter()
        .context("Failed to initialize metric exporter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize span exporter")?;

    init_logger(logger_provider, "apigateway", is_dev, is_enable_file);

    info!("🚀 Starting API Gateway initialization...");

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(db_pool, &config.jwt_secret)
        .await
        .context("Failed to create AppState")?;

    if config.seed_on_start {
        match state
            .di_container
            .seed
            .seed_if_empty()
            .await
            .context("Failed to seed sample data")?
        {
            Some(summary) => info!(
                "🌱 Seeded {} products and {} users on startup",
                summary.created_products, summary.created_users
            ),
            None => info!("🌱 SEED_ON_START set but data already present"),
        }
    }

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down API Gateway...");

    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {}", e);
    }

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("📦 Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
