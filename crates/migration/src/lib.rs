//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_group;
mod m20240101_000002_create_user;
mod m20240101_000003_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_group::Migration),
            Box::new(m20240101_000002_create_user::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000003_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn up_and_down_on_sqlite() -> Result<(), DbErr> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1);
        let db = Database::connect(opts).await?;

        Migrator::up(&db, None).await?;
        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("group").await?);
        assert!(manager.has_table("user").await?);

        Migrator::down(&db, None).await?;
        assert!(!manager.has_table("user").await?);
        assert!(!manager.has_table("group").await?);
        Ok(())
    }
}
