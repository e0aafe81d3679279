use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

pub use configs::DatabaseConfig;

/// Build a pooled connection from validated settings.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    cfg.validate()?;
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), max_connections = cfg.max_connections, "database connected");
    Ok(db)
}
