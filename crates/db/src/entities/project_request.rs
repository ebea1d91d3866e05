//! Project request entity (buyer → artist commission offers).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project request lifecycle states.
///
/// `PENDING` transitions to `ACCEPTED` or `DENIED`; an accepted request may
/// additionally gain a delivery link exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectRequestStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "ACCEPTED")]
    Accepted,
    #[sea_orm(string_value = "DENIED")]
    Denied,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub buyer_id: String,

    #[sea_orm(indexed)]
    pub artist_id: String,

    /// Chat the summary/confirmation messages are appended to
    #[sea_orm(nullable, indexed)]
    pub chat_id: Option<String>,

    /// Free-form budget string (e.g. "500 EUR")
    pub budget: String,

    #[sea_orm(nullable)]
    pub deadline: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub status: ProjectRequestStatus,

    #[sea_orm(nullable)]
    pub delivery_link: Option<String>,

    #[sea_orm(nullable)]
    pub delivered_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Buyer,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ArtistId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Artist,

    #[sea_orm(
        belongs_to = "super::chat::Entity",
        from = "Column::ChatId",
        to = "super::chat::Column::Id",
        on_delete = "SetNull"
    )]
    Chat,
}

impl Related<super::chat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
