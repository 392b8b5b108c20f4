//! Wallet business logic - balances per user and guild.
//!
//! Wallets are created lazily. Balance changes go through a single
//! `UPDATE ... SET balance = balance + delta` statement so they can be combined
//! with other writes inside one database transaction.

use crate::{
    entities::{Wallet, wallet},
    errors::{Error, Result},
};
use sea_orm::{
    PaginatorTrait, QueryOrder, Set,
    prelude::*,
    sea_query::{Expr, OnConflict},
};
use tracing::{debug, info};

/// One page of the guild leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    /// Wallets on this page, richest first
    pub wallets: Vec<wallet::Model>,
    /// Zero-based page that was actually returned (clamped into range)
    pub page: u64,
    /// Total number of pages, at least 1
    pub total_pages: u64,
    /// Rank of the first wallet on this page (1-based)
    pub first_rank: u64,
}

/// Finds the wallet of a user in a guild.
pub async fn get_wallet<C>(db: &C, user_id: &str, guild_id: &str) -> Result<Option<wallet::Model>>
where
    C: ConnectionTrait,
{
    Wallet::find()
        .filter(wallet::Column::UserDiscordId.eq(user_id))
        .filter(wallet::Column::GuildDiscordId.eq(guild_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a wallet by its id.
pub async fn get_wallet_by_id<C>(db: &C, wallet_id: i64) -> Result<Option<wallet::Model>>
where
    C: ConnectionTrait,
{
    Wallet::find_by_id(wallet_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the wallet of a user in a guild, creating an empty one if needed.
///
/// Creation relies on the unique `(user, guild)` index: a concurrent insert for the
/// same pair is ignored and the surviving row is selected.
pub async fn get_or_create_wallet<C>(db: &C, user_id: &str, guild_id: &str) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = get_wallet(db, user_id, guild_id).await? {
        return Ok(existing);
    }

    let wallet = wallet::ActiveModel {
        user_discord_id: Set(user_id.to_string()),
        guild_discord_id: Set(guild_id.to_string()),
        balance: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let inserted = Wallet::insert(wallet)
        .on_conflict(
            OnConflict::columns([
                wallet::Column::UserDiscordId,
                wallet::Column::GuildDiscordId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let wallet = get_wallet(db, user_id, guild_id).await?.ok_or_else(|| {
        DbErr::RecordNotFound(format!("wallet of {user_id} in guild {guild_id}"))
    })?;
    if inserted > 0 {
        info!(
            "Created wallet {} for user {} in guild {}",
            wallet.id, user_id, guild_id
        );
    }
    Ok(wallet)
}

/// Adds `delta` to a wallet balance with a single atomic UPDATE.
///
/// Works on a plain connection or inside a transaction. Returns the updated wallet.
pub async fn adjust_balance_atomic<C>(db: &C, wallet_id: i64, delta: i64) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    let result = Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).add(delta),
        )
        .filter(wallet::Column::Id.eq(wallet_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::WalletNotFound { id: wallet_id });
    }

    debug!("Adjusted wallet {wallet_id} by {delta}");
    Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })
}

/// Fetches one page of the guild leaderboard ordered by balance.
///
/// Out-of-range pages are clamped to the last page.
pub async fn leaderboard_page(
    db: &DatabaseConnection,
    guild_id: &str,
    page: u64,
    page_size: u64,
) -> Result<LeaderboardPage> {
    let page_size = page_size.max(1);
    let paginator = Wallet::find()
        .filter(wallet::Column::GuildDiscordId.eq(guild_id))
        .order_by_desc(wallet::Column::Balance)
        .order_by_asc(wallet::Column::Id)
        .paginate(db, page_size);

    let total_pages = paginator.num_pages().await?.max(1);
    let page = page.min(total_pages - 1);
    let wallets = paginator.fetch_page(page).await?;

    Ok(LeaderboardPage {
        wallets,
        page,
        total_pages,
        first_rank: page * page_size + 1,
    })
}
