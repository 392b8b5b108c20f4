//! Clan member entity - Membership of a user in a clan.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Clan member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clan_members")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Clan the user belongs to
    pub clan_id: i64,
    /// Discord user ID of the member
    pub discord_user_id: String,
    /// When the user joined
    pub joined_at: DateTimeUtc,
}

/// Defines relationships between `ClanMember` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each membership belongs to one clan
    #[sea_orm(
        belongs_to = "super::clan::Entity",
        from = "Column::ClanId",
        to = "super::clan::Column::Id"
    )]
    Clan,
}

impl Related<super::clan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
