//! Clan entity - A named group of users inside a guild.
//!
//! The clan level drives the mining bonus of its members.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Clan database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clans")]
pub struct Model {
    /// Unique identifier for the clan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique per guild (case-insensitive)
    pub name: String,
    /// Discord guild ID the clan lives in
    pub discord_guild_id: String,
    /// Discord user ID of the founder
    pub owner_discord_id: String,
    /// Clan level, starts at 1
    pub level: i32,
    /// Channel that receives clan notifications, if configured
    pub notification_channel_id: Option<String>,
    /// When the clan was founded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Clan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One clan has many members
    #[sea_orm(has_many = "super::clan_member::Entity")]
    Members,
}

impl Related<super::clan_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
