//! Create project request table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectRequest::BuyerId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectRequest::ArtistId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRequest::ChatId).string_len(32))
                    .col(
                        ColumnDef::new(ProjectRequest::Budget)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRequest::Deadline).timestamp_with_time_zone())
                    .col(ColumnDef::new(ProjectRequest::Notes).text())
                    .col(
                        ColumnDef::new(ProjectRequest::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRequest::DeliveryLink).string_len(1024))
                    .col(ColumnDef::new(ProjectRequest::DeliveredAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ProjectRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_request_buyer")
                            .from(ProjectRequest::Table, ProjectRequest::BuyerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_request_artist")
                            .from(ProjectRequest::Table, ProjectRequest::ArtistId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_request_chat")
                            .from(ProjectRequest::Table, ProjectRequest::ChatId)
                            .to(Chat::Table, Chat::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (artist_id, status, created_at) - respond/deliver select the
        // newest matching row for an artist
        manager
            .create_index(
                Index::create()
                    .name("idx_project_request_artist_status")
                    .table(ProjectRequest::Table)
                    .col(ProjectRequest::ArtistId)
                    .col(ProjectRequest::Status)
                    .col(ProjectRequest::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: (buyer_id, status)
        manager
            .create_index(
                Index::create()
                    .name("idx_project_request_buyer_status")
                    .table(ProjectRequest::Table)
                    .col(ProjectRequest::BuyerId)
                    .col(ProjectRequest::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProjectRequest {
    Table,
    Id,
    BuyerId,
    ArtistId,
    ChatId,
    Budget,
    Deadline,
    Notes,
    Status,
    DeliveryLink,
    DeliveredAt,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Chat {
    Table,
    Id,
}
