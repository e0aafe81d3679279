//! Create `user` table.
//!
//! `group_id` is a plain nullable integer: deleting a group leaves its users
//! pointing at the old id, so no foreign-key constraint is declared here.
//! Existence of the referenced group is checked by the service on create.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::Email, 120).unique_key())
                    .col(string_len(User::Password, 120))
                    .col(string_len(User::Name, 120))
                    .col(integer_null(User::GroupId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, Email, Password, Name, GroupId }
