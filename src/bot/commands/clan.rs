//! Clan Discord commands.
//!
//! Clans give their members a mining bonus that grows with the clan level. The
//! owner pays for founding and upgrades and may set a notification channel.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, guards, respond},
            views,
        },
        core::{clan, format::format_currency, mine},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::warn;

    /// Replies with the clan error message, or propagates infrastructure errors.
    async fn reply_clan_error(ctx: poise::Context<'_, BotData, Error>, error: Error) -> Result<()> {
        match error {
            Error::Database(_) | Error::Framework(_) => Err(error),
            other => respond::say_ephemeral(ctx, respond::user_message(&other)).await,
        }
    }

    /// Create, join and manage clans.
    #[poise::command(
        slash_command,
        subcommands(
            "clan_create",
            "clan_join",
            "clan_leave",
            "clan_disband",
            "clan_info",
            "clan_upgrade",
            "clan_channel",
            "clan_notify"
        )
    )]
    pub async fn clan(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Use `/help` to see the clan subcommands.").await?;
        Ok(())
    }

    /// Founds a new clan.
    #[poise::command(slash_command, rename = "create")]
    pub async fn clan_create(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Clan name"] name: String,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        match clan::create_clan(&data.database, &data.settings.clan, &user_id, &guild_id, &name).await {
            Ok(created) => {
                ctx.say(format!(
                    "🛡️ <@{user_id}> founded **{}** for {}!",
                    created.name,
                    format_currency(data.settings.clan.creation_cost)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_clan_error(ctx, e).await,
        }
    }

    /// Joins an existing clan.
    #[poise::command(slash_command, rename = "join")]
    pub async fn clan_join(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Clan to join"]
        #[autocomplete = "autocomplete::autocomplete_clan_name"]
        name: String,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();

        match clan::join_clan(&ctx.data().database, &user_id, &guild_id, &name).await {
            Ok(joined) => {
                ctx.say(format!("🤝 <@{user_id}> joined **{}**!", joined.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_clan_error(ctx, e).await,
        }
    }

    /// Leaves your clan.
    #[poise::command(slash_command, rename = "leave")]
    pub async fn clan_leave(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();

        match clan::leave_clan(&ctx.data().database, &user_id, &guild_id).await {
            Ok(left) => {
                ctx.say(format!("👋 <@{user_id}> left **{}**.", left.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_clan_error(ctx, e).await,
        }
    }

    /// Deletes your clan. Owner only.
    #[poise::command(slash_command, rename = "disband")]
    pub async fn clan_disband(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();

        match clan::disband_clan(&ctx.data().database, &user_id, &guild_id).await {
            Ok(disbanded) => {
                ctx.say(format!("💥 **{}** has been disbanded.", disbanded.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_clan_error(ctx, e).await,
        }
    }

    /// Shows a clan overview. Defaults to your own clan.
    #[poise::command(slash_command, rename = "info")]
    pub async fn clan_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Clan to look up"]
        #[autocomplete = "autocomplete::autocomplete_clan_name"]
        name: Option<String>,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let db = &data.database;

        let found = match &name {
            Some(name) => clan::get_clan_by_name(db, &guild_id, name).await?,
            None => clan::get_user_clan(db, &ctx.author().id.to_string(), &guild_id).await?,
        };
        let Some(found) = found else {
            let message = name.map_or_else(
                || respond::user_message(&Error::NotInClan),
                |name| respond::user_message(&Error::ClanNotFound { name }),
            );
            respond::say_ephemeral(ctx, message).await?;
            return Ok(());
        };

        let members = clan::list_members(db, found.id).await?;
        let next_upgrade = (found.level < data.settings.clan.max_level)
            .then(|| clan::upgrade_cost(&data.settings.clan, found.level));
        ctx.send(poise::CreateReply::default().embed(views::clan_embed(&found, &members, next_upgrade)))
            .await?;
        Ok(())
    }

    /// Raises your clan's level. Owner only.
    #[poise::command(slash_command, rename = "upgrade")]
    pub async fn clan_upgrade(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        match clan::upgrade_clan(&data.database, &data.settings.clan, &user_id, &guild_id).await {
            Ok(upgraded) => {
                ctx.say(format!(
                    "⬆️ **{}** is now level {}! Members earn {}% more from mining.",
                    upgraded.name,
                    upgraded.level,
                    mine::clan_bonus_percent(upgraded.level)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_clan_error(ctx, e).await,
        }
    }

    /// Sets or clears the channel clan notifications are posted in. Owner only.
    #[poise::command(slash_command, rename = "channel")]
    pub async fn clan_channel(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Channel for notifications (omit to clear)"]
        #[channel_types("Text")]
        channel: Option<serenity::GuildChannel>,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let channel_id = channel.map(|c| c.id.to_string());

        match clan::set_notification_channel(&ctx.data().database, &user_id, &guild_id, channel_id)
            .await
        {
            Ok(updated) => {
                let message = updated.notification_channel_id.map_or_else(
                    || "🔕 Clan notifications disabled.".to_string(),
                    |id| format!("🔔 Clan notifications will be posted in <#{id}>."),
                );
                respond::say_ephemeral(ctx, message).await
            }
            Err(e) => reply_clan_error(ctx, e).await,
        }
    }

    /// Posts a message to your clan's notification channel.
    #[poise::command(slash_command, rename = "notify")]
    pub async fn clan_notify(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Message for your clan"] message: String,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let Some(own_clan) = clan::get_user_clan(&ctx.data().database, &user_id, &guild_id).await? else {
            return reply_clan_error(ctx, Error::NotInClan).await;
        };

        let content = format!("📢 **{}** | <@{user_id}>: {message}", own_clan.name);
        let delivered = match own_clan
            .notification_channel_id
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
            .filter(|id| *id != 0)
        {
            Some(id) => serenity::ChannelId::new(id)
                .send_message(ctx.http(), serenity::CreateMessage::new().content(&content))
                .await
                .inspect_err(|e| warn!("Failed to deliver clan notification: {}", e))
                .is_ok(),
            None => false,
        };

        let reply = clan::notification_or_message(Some(&own_clan), &content, delivered);
        ctx.send(
            poise::CreateReply::default()
                .content(reply.content)
                .ephemeral(reply.ephemeral),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
