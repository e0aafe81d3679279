#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Each test gets its own in-memory database with migrations applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
