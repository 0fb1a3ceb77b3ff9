use anyhow::{Context, Result};
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use storefront::{
    config::myconfig::Config, database::run_migrations, handler::AppRouter, state::AppState,
};
use tracing::{error, info};

const SERVICE_NAME: &str = "storefront-service";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init(SERVICE_NAME, endpoint).context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Storefront Service initialization...");

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
        info!("✅ Database migrations applied");
    }

    let state = AppState::new(db_pool);

    let served = AppRouter::serve(config.port, state).await;

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {}", e);
        }
    }

    info!("✅ Storefront Service shutdown complete.");
    served
}
