//! Create `work_entry` table with FK to `account`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkEntry::Table)
                    .if_not_exists()
                    .col(uuid(WorkEntry::Id).primary_key())
                    .col(uuid(WorkEntry::AccountId).not_null())
                    .col(string_len(WorkEntry::Email, 255).not_null())
                    .col(string_len(WorkEntry::Username, 128).not_null())
                    .col(string_len(WorkEntry::Task, 512).not_null())
                    .col(double(WorkEntry::Hours).not_null())
                    .col(date(WorkEntry::WorkedOn).not_null())
                    .col(timestamp_with_time_zone(WorkEntry::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_entry_account")
                            .from(WorkEntry::Table, WorkEntry::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkEntry::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WorkEntry {
    Table,
    Id,
    AccountId,
    Email,
    Username,
    Task,
    Hours,
    WorkedOn,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
}
