//! Create creation table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Creation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Creation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Creation::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Creation::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Creation::Link).string_len(1024))
                    .col(ColumnDef::new(Creation::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(Creation::Description).text())
                    .col(
                        ColumnDef::new(Creation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_creation_user")
                            .from(Creation::Table, Creation::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) - portfolios list newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_creation_user_created_at")
                    .table(Creation::Table)
                    .col(Creation::UserId)
                    .col(Creation::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Creation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Creation {
    Table,
    Id,
    UserId,
    Title,
    Link,
    ImageUrl,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
