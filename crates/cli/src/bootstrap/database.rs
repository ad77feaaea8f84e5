use hearth_dns_domain::config::DatabaseConfig;
use hearth_dns_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(database_url: &str, cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!("Initializing record store: {}", database_url);

    let pool = create_pool(database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize record store: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Record store ready (max_connections={})",
        cfg.max_connections
    );

    Ok(pool)
}
