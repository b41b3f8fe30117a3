//! Create `visitor_message` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitorMessage::Table)
                    .if_not_exists()
                    .col(uuid(VisitorMessage::Id).primary_key())
                    .col(string_len(VisitorMessage::Email, 255).not_null())
                    .col(text(VisitorMessage::Message).not_null())
                    .col(timestamp_with_time_zone(VisitorMessage::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(VisitorMessage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum VisitorMessage {
    Table,
    Id,
    Email,
    Message,
    CreatedAt,
}
