//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User roles on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Offers creative services.
    #[sea_orm(string_value = "ARTIST")]
    Artist,
    /// Commissions creative work.
    #[sea_orm(string_value = "BUYER")]
    Buyer,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Subject id assigned by the external identity provider
    #[sea_orm(unique)]
    pub external_id: String,

    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Display name
    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// Public handle, chosen in the profile editor
    #[sea_orm(unique, nullable)]
    pub alias: Option<String>,

    /// NULL until the user picks a role
    #[sea_orm(nullable)]
    pub role: Option<Role>,

    #[sea_orm(nullable)]
    pub country: Option<String>,

    /// Creative domain (artists only; cleared when role becomes BUYER)
    #[sea_orm(nullable)]
    pub domain: Option<String>,

    /// Comma-delimited language list
    #[sea_orm(nullable)]
    pub languages: Option<String>,

    /// Avatar URL
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Placeholder wallet address, assigned at creation
    pub wallet_address: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,

    #[sea_orm(has_many = "super::creation::Entity")]
    Creations,

    #[sea_orm(has_many = "super::user_badge::Entity")]
    Badges,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::creation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creations.def()
    }
}

impl Related<super::user_badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Badges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
