//! Shop and inventory business logic.
//!
//! Tools are bought with wallet money and stored as `shop_items` rows. A wallet
//! owns at most one of each tool. Disposing a tool deletes the row without a refund.

use crate::{
    core::wallet,
    entities::{ShopItem, shop_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt::Write;
use tracing::{info, instrument};

/// Tools sold in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolType {
    /// Pickaxe
    Pickaxe,
    /// Axe
    Axe,
    /// Fishing rod
    FishingRod,
}

impl ToolType {
    /// Every tool, in shop order.
    pub const ALL: [Self; 3] = [Self::Pickaxe, Self::Axe, Self::FishingRod];

    /// Stable catalog id stored in `shop_items.item_id`
    #[must_use]
    pub const fn item_id(self) -> &'static str {
        match self {
            Self::Pickaxe => "pickaxe",
            Self::Axe => "axe",
            Self::FishingRod => "fishing_rod",
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pickaxe => "Pickaxe",
            Self::Axe => "Axe",
            Self::FishingRod => "Fishing Rod",
        }
    }

    /// Emoji shown next to the name
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Pickaxe => "⛏️",
            Self::Axe => "🪓",
            Self::FishingRod => "🎣",
        }
    }

    /// Price in dollars
    #[must_use]
    pub const fn price(self) -> i64 {
        match self {
            Self::Pickaxe => 25_000,
            Self::Axe => 20_000,
            Self::FishingRod => 15_000,
        }
    }

    /// `EMOJI|Name`, the label used in menus and confirmations
    #[must_use]
    pub fn label(self) -> String {
        format!("{}|{}", self.emoji(), self.name())
    }

    /// Looks a tool up by its catalog id.
    #[must_use]
    pub fn from_item_id(item_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.item_id() == item_id)
    }

    /// Looks a tool up by catalog id or display name, ignoring case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|tool| {
            tool.item_id() == needle || tool.name().to_lowercase() == needle
        })
    }
}

/// Lists the tools a wallet owns, oldest purchase first.
pub async fn get_inventory<C>(db: &C, wallet_id: i64) -> Result<Vec<shop_item::Model>>
where
    C: ConnectionTrait,
{
    ShopItem::find()
        .filter(shop_item::Column::WalletId.eq(wallet_id))
        .order_by_asc(shop_item::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an owned tool by its unique id.
pub async fn get_item_by_id(
    db: &DatabaseConnection,
    item_id: &str,
) -> Result<Option<shop_item::Model>> {
    ShopItem::find_by_id(item_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Buys a tool: checks ownership and balance, charges, and stores the item atomically.
///
/// # Errors
/// - `WalletNotFound` when the wallet does not exist
/// - `ItemAlreadyOwned` when the wallet already has this tool
/// - `InsufficientFunds` when the balance is below the price
#[instrument(skip(db))]
pub async fn buy_tool(
    db: &DatabaseConnection,
    wallet_id: i64,
    tool: ToolType,
) -> Result<shop_item::Model> {
    let txn = db.begin().await?;

    let wallet = wallet::get_wallet_by_id(&txn, wallet_id)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    let owned = ShopItem::find()
        .filter(shop_item::Column::WalletId.eq(wallet_id))
        .filter(shop_item::Column::ItemId.eq(tool.item_id()))
        .one(&txn)
        .await?;
    if owned.is_some() {
        return Err(Error::ItemAlreadyOwned {
            name: tool.name().to_string(),
        });
    }

    if wallet.balance < tool.price() {
        return Err(Error::InsufficientFunds {
            current: wallet.balance,
            required: tool.price(),
        });
    }

    wallet::adjust_balance_atomic(&txn, wallet_id, -tool.price()).await?;
    let item = shop_item::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        wallet_id: Set(wallet_id),
        item_id: Set(tool.item_id().to_string()),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Wallet {} bought {}", wallet_id, tool.name());
    Ok(item)
}

/// Deletes an owned tool. Returns the deleted item.
pub async fn dispose_item(db: &DatabaseConnection, item_id: &str) -> Result<shop_item::Model> {
    let item = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    ShopItem::delete_by_id(item.id.clone()).exec(db).await?;
    info!("Disposed item {} from wallet {}", item.id, item.wallet_id);
    Ok(item)
}

/// Renders an inventory listing for the inventory embed.
///
/// # Errors
/// Only fails if writing to the string fails.
pub fn format_inventory(items: &[shop_item::Model]) -> Result<String> {
    if items.is_empty() {
        return Ok("Your inventory is empty. Visit `/shop list` to buy tools.".to_string());
    }

    let mut text = String::new();
    for item in items {
        match ToolType::from_item_id(&item.item_id) {
            Some(tool) => writeln!(&mut text, "{} **{}**", tool.emoji(), tool.name())?,
            None => writeln!(&mut text, "❔ **{}**", item.item_id)?,
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_tool_lookup() {
        assert_eq!(ToolType::from_item_id("axe"), Some(ToolType::Axe));
        assert_eq!(ToolType::from_item_id("sword"), None);
        assert_eq!(ToolType::parse("Fishing Rod"), Some(ToolType::FishingRod));
        assert_eq!(ToolType::parse(" PICKAXE "), Some(ToolType::Pickaxe));
        assert_eq!(ToolType::Pickaxe.label(), "⛏️|Pickaxe");
    }

    #[tokio::test]
    async fn test_buy_tool_charges_wallet() -> Result<()> {
        let db = setup_test_db().await?;
        let wallet = create_test_wallet(&db, "buyer", 30_000).await?;

        let item = buy_tool(&db, wallet.id, ToolType::Pickaxe).await?;
        assert_eq!(item.item_id, "pickaxe");
        assert_eq!(item.wallet_id, wallet.id);

        let wallet = wallet::get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(wallet.balance, 5_000);
        assert_eq!(get_inventory(&db, wallet.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_tool_unique_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let wallet = create_test_wallet(&db, "buyer", 100_000).await?;

        buy_tool(&db, wallet.id, ToolType::Axe).await?;
        let second = buy_tool(&db, wallet.id, ToolType::Axe).await;
        assert!(matches!(second, Err(Error::ItemAlreadyOwned { .. })));

        // Different tools are fine
        buy_tool(&db, wallet.id, ToolType::FishingRod).await?;
        let wallet = wallet::get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(wallet.balance, 65_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_tool_insufficient_funds() -> Result<()> {
        let db = setup_test_db().await?;
        let wallet = create_test_wallet(&db, "buyer", 1_000).await?;

        let result = buy_tool(&db, wallet.id, ToolType::FishingRod).await;
        assert!(matches!(
            result,
            Err(Error::InsufficientFunds {
                current: 1_000,
                required: 15_000
            })
        ));
        assert!(get_inventory(&db, wallet.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_tool_missing_wallet() -> Result<()> {
        let db = setup_test_db().await?;
        let result = buy_tool(&db, 404, ToolType::Axe).await;
        assert!(matches!(result, Err(Error::WalletNotFound { id: 404 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_dispose_item() -> Result<()> {
        let db = setup_test_db().await?;
        let wallet = create_test_wallet(&db, "buyer", 100_000).await?;
        let item = buy_tool(&db, wallet.id, ToolType::Axe).await?;

        let disposed = dispose_item(&db, &item.id).await?;
        assert_eq!(disposed.id, item.id);
        assert!(get_item_by_id(&db, &item.id).await?.is_none());

        let again = dispose_item(&db, &item.id).await;
        assert!(matches!(again, Err(Error::ItemNotFound { .. })));
        Ok(())
    }

    #[test]
    fn test_format_inventory() {
        assert!(format_inventory(&[]).unwrap().contains("empty"));

        let items = vec![shop_item::Model {
            id: "1".to_string(),
            wallet_id: 1,
            item_id: "axe".to_string(),
            created_at: chrono::Utc::now(),
        }];
        assert_eq!(format_inventory(&items).unwrap(), "🪓 **Axe**\n");
    }
}
