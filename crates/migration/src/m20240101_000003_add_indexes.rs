use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users: index on group_id, used when listing a group's members
        manager
            .create_index(
                Index::create()
                    .name("idx_user_group")
                    .table(User::Table)
                    .col(User::GroupId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_group").table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, GroupId }
