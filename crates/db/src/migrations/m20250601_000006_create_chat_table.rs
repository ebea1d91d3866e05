//! Create chat table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chat::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chat::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chat::UserAId).string_len(32).not_null())
                    .col(ColumnDef::new(Chat::UserBId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Chat::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_user_a")
                            .from(Chat::Table, Chat::UserAId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_user_b")
                            .from(Chat::Table, Chat::UserBId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_a_id, user_b_id) - one chat per unordered pair;
        // the application stores the pair sorted so this covers both orders
        manager
            .create_index(
                Index::create()
                    .name("idx_chat_pair")
                    .table(Chat::Table)
                    .col(Chat::UserAId)
                    .col(Chat::UserBId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user_b_id (user_a_id is covered by the pair index prefix)
        manager
            .create_index(
                Index::create()
                    .name("idx_chat_user_b_id")
                    .table(Chat::Table)
                    .col(Chat::UserBId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chat::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Chat {
    Table,
    Id,
    UserAId,
    UserBId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
