//! Shop item entity - A tool bought from the shop and owned by a wallet.
//!
//! The primary key is a UUID string so it can be passed around as a select menu value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shop item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shop_items")]
pub struct Model {
    /// Unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Wallet that owns the item
    pub wallet_id: i64,
    /// Catalog id of the tool, e.g. `"pickaxe"`
    pub item_id: String,
    /// When the item was bought
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `ShopItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one wallet
    #[sea_orm(
        belongs_to = "super::wallet::Entity",
        from = "Column::WalletId",
        to = "super::wallet::Column::Id"
    )]
    Wallet,
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
