use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};

/// CRUD operations and relationship lookups for both entities
pub mod crud_tests;


/// Fresh in-memory database with migrations applied
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
