//! Clan business logic - founding, membership, upgrades and notifications.
//!
//! A user belongs to at most one clan per guild. Paid actions (founding and
//! upgrading) charge the caller's wallet inside the same database transaction
//! that changes the clan.

use crate::{
    config::settings::ClanSettings,
    core::wallet,
    entities::{Clan, ClanMember, clan, clan_member},
    errors::{Error, Result},
};
use sea_orm::{
    JoinType, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait, prelude::*,
    sea_query::{Expr, Func},
};
use tracing::{info, instrument};

const MAX_CLAN_NAME_LEN: usize = 32;

/// How a clan action should be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanReply {
    /// Text of the reply
    pub content: String,
    /// Whether only the caller sees it
    pub ephemeral: bool,
}

/// Finds the clan a user belongs to in a guild.
pub async fn get_user_clan<C>(db: &C, user_id: &str, guild_id: &str) -> Result<Option<clan::Model>>
where
    C: ConnectionTrait,
{
    Clan::find()
        .join(JoinType::InnerJoin, clan::Relation::Members.def())
        .filter(clan_member::Column::DiscordUserId.eq(user_id))
        .filter(clan::Column::DiscordGuildId.eq(guild_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a clan in a guild by name, ignoring case.
pub async fn get_clan_by_name<C>(db: &C, guild_id: &str, name: &str) -> Result<Option<clan::Model>>
where
    C: ConnectionTrait,
{
    Clan::find()
        .filter(clan::Column::DiscordGuildId.eq(guild_id))
        .filter(
            Expr::expr(Func::lower(Expr::col(clan::Column::Name)))
                .eq(name.trim().to_lowercase()),
        )
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a clan by id.
pub async fn get_clan_by_id<C>(db: &C, clan_id: i64) -> Result<Option<clan::Model>>
where
    C: ConnectionTrait,
{
    Clan::find_by_id(clan_id).one(db).await.map_err(Into::into)
}

/// Lists all clans of a guild, highest level first.
pub async fn list_clans(db: &DatabaseConnection, guild_id: &str) -> Result<Vec<clan::Model>> {
    Clan::find()
        .filter(clan::Column::DiscordGuildId.eq(guild_id))
        .order_by_desc(clan::Column::Level)
        .order_by_asc(clan::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the members of a clan in join order.
pub async fn list_members(
    db: &DatabaseConnection,
    clan_id: i64,
) -> Result<Vec<clan_member::Model>> {
    ClanMember::find()
        .filter(clan_member::Column::ClanId.eq(clan_id))
        .order_by_asc(clan_member::Column::JoinedAt)
        .order_by_asc(clan_member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn validate_clan_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Config {
            message: "Clan name cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_CLAN_NAME_LEN {
        return Err(Error::Config {
            message: format!("Clan name cannot be longer than {MAX_CLAN_NAME_LEN} characters"),
        });
    }
    Ok(trimmed.to_string())
}

/// Cost of upgrading a clan currently at `level`.
#[must_use]
pub const fn upgrade_cost(settings: &ClanSettings, level: i32) -> i64 {
    (level as i64 + 1) * settings.upgrade_cost_per_level
}

/// Charges a wallet inside a transaction, failing when the balance is too low.
async fn charge<C>(db: &C, user_id: &str, guild_id: &str, price: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let wallet = wallet::get_or_create_wallet(db, user_id, guild_id).await?;
    if wallet.balance < price {
        return Err(Error::InsufficientFunds {
            current: wallet.balance,
            required: price,
        });
    }
    wallet::adjust_balance_atomic(db, wallet.id, -price).await?;
    Ok(())
}

/// Founds a clan with the caller as owner and first member.
///
/// # Errors
/// - `Config` for an empty or too long name
/// - `AlreadyInClan` when the caller is already a member of a clan in this guild
/// - `ClanNameTaken` when the name is used in this guild
/// - `InsufficientFunds` when the caller cannot pay `creation_cost`
#[instrument(skip(db, settings))]
pub async fn create_clan(
    db: &DatabaseConnection,
    settings: &ClanSettings,
    user_id: &str,
    guild_id: &str,
    name: &str,
) -> Result<clan::Model> {
    let name = validate_clan_name(name)?;

    let txn = db.begin().await?;

    if let Some(existing) = get_user_clan(&txn, user_id, guild_id).await? {
        return Err(Error::AlreadyInClan {
            clan: existing.name,
        });
    }
    if get_clan_by_name(&txn, guild_id, &name).await?.is_some() {
        return Err(Error::ClanNameTaken { name });
    }

    charge(&txn, user_id, guild_id, settings.creation_cost).await?;

    let now = chrono::Utc::now();
    let clan = clan::ActiveModel {
        name: Set(name),
        discord_guild_id: Set(guild_id.to_string()),
        owner_discord_id: Set(user_id.to_string()),
        level: Set(1),
        notification_channel_id: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    clan_member::ActiveModel {
        clan_id: Set(clan.id),
        discord_user_id: Set(user_id.to_string()),
        joined_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Clan '{}' ({}) founded by {}", clan.name, clan.id, user_id);
    Ok(clan)
}

/// Adds the caller to a clan of the guild.
pub async fn join_clan(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    name: &str,
) -> Result<clan::Model> {
    let txn = db.begin().await?;

    if let Some(existing) = get_user_clan(&txn, user_id, guild_id).await? {
        return Err(Error::AlreadyInClan {
            clan: existing.name,
        });
    }

    let clan = get_clan_by_name(&txn, guild_id, name)
        .await?
        .ok_or_else(|| Error::ClanNotFound {
            name: name.to_string(),
        })?;

    clan_member::ActiveModel {
        clan_id: Set(clan.id),
        discord_user_id: Set(user_id.to_string()),
        joined_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("User {} joined clan {}", user_id, clan.id);
    Ok(clan)
}

/// Removes the caller from their clan. Owners must disband instead.
pub async fn leave_clan(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
) -> Result<clan::Model> {
    let clan = get_user_clan(db, user_id, guild_id)
        .await?
        .ok_or(Error::NotInClan)?;

    if clan.owner_discord_id == user_id {
        return Err(Error::OwnerCannotLeave);
    }

    ClanMember::delete_many()
        .filter(clan_member::Column::ClanId.eq(clan.id))
        .filter(clan_member::Column::DiscordUserId.eq(user_id))
        .exec(db)
        .await?;

    info!("User {} left clan {}", user_id, clan.id);
    Ok(clan)
}

/// Deletes the caller's clan and all memberships. Owner only.
pub async fn disband_clan(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
) -> Result<clan::Model> {
    let txn = db.begin().await?;

    let clan = get_user_clan(&txn, user_id, guild_id)
        .await?
        .ok_or(Error::NotInClan)?;
    if clan.owner_discord_id != user_id {
        return Err(Error::NotClanOwner);
    }

    ClanMember::delete_many()
        .filter(clan_member::Column::ClanId.eq(clan.id))
        .exec(&txn)
        .await?;
    Clan::delete_by_id(clan.id).exec(&txn).await?;

    txn.commit().await?;
    info!("Clan {} disbanded by {}", clan.id, user_id);
    Ok(clan)
}

/// Raises the caller's clan by one level, charging the owner's wallet.
pub async fn upgrade_clan(
    db: &DatabaseConnection,
    settings: &ClanSettings,
    user_id: &str,
    guild_id: &str,
) -> Result<clan::Model> {
    let txn = db.begin().await?;

    let clan = get_user_clan(&txn, user_id, guild_id)
        .await?
        .ok_or(Error::NotInClan)?;
    if clan.owner_discord_id != user_id {
        return Err(Error::NotClanOwner);
    }
    if clan.level >= settings.max_level {
        return Err(Error::ClanMaxLevel { level: clan.level });
    }

    charge(&txn, user_id, guild_id, upgrade_cost(settings, clan.level)).await?;

    let new_level = clan.level + 1;
    let mut active: clan::ActiveModel = clan.into();
    active.level = Set(new_level);
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    info!("Clan {} upgraded to level {}", updated.id, updated.level);
    Ok(updated)
}

/// Sets or clears the clan notification channel. Owner only.
pub async fn set_notification_channel(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    channel_id: Option<String>,
) -> Result<clan::Model> {
    let clan = get_user_clan(db, user_id, guild_id)
        .await?
        .ok_or(Error::NotInClan)?;
    if clan.owner_discord_id != user_id {
        return Err(Error::NotClanOwner);
    }

    let mut active: clan::ActiveModel = clan.into();
    active.notification_channel_id = Set(channel_id);
    active.update(db).await.map_err(Into::into)
}

/// Decides how to acknowledge a clan notification.
///
/// When the clan has a notification channel and the message was delivered there,
/// the caller only gets an ephemeral copy. Otherwise the content is posted as a
/// normal reply so the clan still sees it.
#[must_use]
pub fn notification_or_message(
    clan: Option<&clan::Model>,
    content: &str,
    delivered: bool,
) -> ClanReply {
    let has_channel = clan.is_some_and(|c| c.notification_channel_id.is_some());
    ClanReply {
        content: content.to_string(),
        ephemeral: has_channel && delivered,
    }
}
