//! Create user table migration.

use sea_orm_migration::prelude::*;

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
                    .col(
                        ColumnDef::new(User::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::ExternalId).string_len(256).not_null())
                    .col(ColumnDef::new(User::Email).string_len(320))
                    .col(ColumnDef::new(User::Name).string_len(256))
                    .col(ColumnDef::new(User::Alias).string_len(128))
                    .col(ColumnDef::new(User::Role).string_len(16))
                    .col(ColumnDef::new(User::Country).string_len(128))
                    .col(ColumnDef::new(User::Domain).string_len(128))
                    .col(ColumnDef::new(User::Languages).string_len(512))
                    .col(ColumnDef::new(User::AvatarUrl).string_len(1024))
                    .col(
                        ColumnDef::new(User::WalletAddress)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(User::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: external_id - one local user per identity-provider subject
        manager
            .create_index(
                Index::create()
                    .name("idx_user_external_id")
                    .table(User::Table)
                    .col(User::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Unique index: alias (NULLs do not collide)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_alias")
                    .table(User::Table)
                    .col(User::Alias)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for the public directory ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_created_at")
                    .table(User::Table)
                    .col(User::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    ExternalId,
    Email,
    Name,
    Alias,
    Role,
    Country,
    Domain,
    Languages,
    AvatarUrl,
    WalletAddress,
    CreatedAt,
    UpdatedAt,
}
