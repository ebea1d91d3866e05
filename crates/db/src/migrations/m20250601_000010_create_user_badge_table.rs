//! Create user badge table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBadge::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBadge::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserBadge::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(UserBadge::BadgeType)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBadge::TxSignature)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBadge::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_badge_user")
                            .from(UserBadge::Table, UserBadge::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (badges are listed per user)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_badge_user_id")
                    .table(UserBadge::Table)
                    .col(UserBadge::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBadge::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserBadge {
    Table,
    Id,
    UserId,
    BadgeType,
    TxSignature,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
