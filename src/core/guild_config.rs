//! Per-guild configuration, currently the economy channel restriction.

use crate::{
    entities::{GuildConfig, guild_config},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Loads the configuration row of a guild.
pub async fn get_guild_config(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<Option<guild_config::Model>> {
    GuildConfig::find()
        .filter(guild_config::Column::GuildDiscordId.eq(guild_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns a refusal message when economy commands are restricted to another channel.
///
/// `None` means the command may run here.
pub async fn economy_channel_guard(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
) -> Result<Option<String>> {
    let config = get_guild_config(db, guild_id).await?;
    Ok(config
        .and_then(|c| c.economy_channel_id)
        .filter(|economy_channel| economy_channel != channel_id)
        .map(|economy_channel| {
            format!("Economy commands can only be used in <#{economy_channel}>.")
        }))
}

/// Sets or clears the economy channel of a guild.
pub async fn set_economy_channel(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: Option<String>,
) -> Result<guild_config::Model> {
    let updated = match get_guild_config(db, guild_id).await? {
        Some(existing) => {
            let mut active: guild_config::ActiveModel = existing.into();
            active.economy_channel_id = Set(channel_id);
            active.update(db).await?
        }
        None => {
            guild_config::ActiveModel {
                guild_discord_id: Set(guild_id.to_string()),
                economy_channel_id: Set(channel_id),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    info!(
        "Economy channel for guild {} set to {:?}",
        guild_id, updated.economy_channel_id
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_guard_without_config_allows_everything() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(economy_channel_guard(&db, TEST_GUILD, "any").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_guard_restricts_to_configured_channel() -> Result<()> {
        let db = setup_test_db().await?;
        set_economy_channel(&db, TEST_GUILD, Some("42".to_string())).await?;

        assert!(economy_channel_guard(&db, TEST_GUILD, "42").await?.is_none());
        assert_eq!(
            economy_channel_guard(&db, TEST_GUILD, "7").await?,
            Some("Economy commands can only be used in <#42>.".to_string())
        );
        assert!(economy_channel_guard(&db, "other", "7").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_clearing_channel_lifts_restriction() -> Result<()> {
        let db = setup_test_db().await?;
        let first = set_economy_channel(&db, TEST_GUILD, Some("42".to_string())).await?;
        let cleared = set_economy_channel(&db, TEST_GUILD, None).await?;

        assert_eq!(first.id, cleared.id);
        assert!(economy_channel_guard(&db, TEST_GUILD, "7").await?.is_none());
        Ok(())
    }
}
