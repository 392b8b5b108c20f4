//! Wallet entity - A user's balance inside one guild.
//!
//! Every (user, guild) pair has at most one wallet. Wallets are created lazily
//! the first time a user touches the economy in a guild.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    /// Unique identifier for the wallet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID of the owner
    pub user_discord_id: String,
    /// Discord guild ID the wallet belongs to
    pub guild_discord_id: String,
    /// Current balance in whole dollars
    pub balance: i64,
    /// When the wallet was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Wallet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One wallet owns many shop items
    #[sea_orm(has_many = "super::shop_item::Entity")]
    ShopItems,
}

impl Related<super::shop_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShopItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
