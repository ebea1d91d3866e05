//! Database migrations.

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user_table;
mod m20250601_000002_create_post_table;
mod m20250601_000003_create_comment_table;
mod m20250601_000004_create_post_like_table;
mod m20250601_000005_create_follow_table;
mod m20250601_000006_create_chat_table;
mod m20250601_000007_create_message_table;
mod m20250601_000008_create_project_request_table;
mod m20250601_000009_create_creation_table;
mod m20250601_000010_create_user_badge_table;

/// Migration runner.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user_table::Migration),
            Box::new(m20250601_000002_create_post_table::Migration),
            Box::new(m20250601_000003_create_comment_table::Migration),
            Box::new(m20250601_000004_create_post_like_table::Migration),
            Box::new(m20250601_000005_create_follow_table::Migration),
            Box::new(m20250601_000006_create_chat_table::Migration),
            Box::new(m20250601_000007_create_message_table::Migration),
            Box::new(m20250601_000008_create_project_request_table::Migration),
            Box::new(m20250601_000009_create_creation_table::Migration),
            Box::new(m20250601_000010_create_user_badge_table::Migration),
        ]
    }
}
