//! Create `group` table.
//!
//! Groups own users through `user.group_id`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Group::Table)
                    .if_not_exists()
                    .col(pk_auto(Group::Id))
                    .col(string_len(Group::Name, 80).unique_key())
                    .col(string_len_null(Group::Description, 120))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Group::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Group { Table, Id, Name, Description }
