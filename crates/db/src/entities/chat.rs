//! Chat entity (one row per unordered pair of users).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Lexicographically smaller participant id (invariant: `user_a_id < user_b_id`)
    #[sea_orm(indexed)]
    pub user_a_id: String,

    /// Lexicographically larger participant id
    #[sea_orm(indexed)]
    pub user_b_id: String,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Returns the id of the participant that is not `user_id`.
    #[must_use]
    pub fn other_participant(&self, user_id: &str) -> &str {
        if self.user_a_id == user_id {
            &self.user_b_id
        } else {
            &self.user_a_id
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserAId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    UserA,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserBId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    UserB,

    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
