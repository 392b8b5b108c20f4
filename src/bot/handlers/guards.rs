//! Checks that run before guild-scoped commands.

use crate::{
    bot::{BotData, handlers::respond::say_ephemeral},
    core::guild_config,
    errors::{Error, Result},
};

/// Reply for guild-only commands invoked in DMs.
pub const GUILD_ONLY_MESSAGE: &str = "This command can only be used in a Server.";

/// Returns the guild id, or replies with [`GUILD_ONLY_MESSAGE`] and returns `None`.
pub async fn require_guild(ctx: poise::Context<'_, BotData, Error>) -> Result<Option<String>> {
    if let Some(guild_id) = ctx.guild_id() {
        return Ok(Some(guild_id.to_string()));
    }
    say_ephemeral(ctx, GUILD_ONLY_MESSAGE).await?;
    Ok(None)
}

/// Like [`require_guild`], and also enforces the guild's economy channel.
pub async fn require_economy_channel(
    ctx: poise::Context<'_, BotData, Error>,
) -> Result<Option<String>> {
    let Some(guild_id) = require_guild(ctx).await? else {
        return Ok(None);
    };

    let channel_id = ctx.channel_id().to_string();
    if let Some(refusal) =
        guild_config::economy_channel_guard(&ctx.data().database, &guild_id, &channel_id).await?
    {
        say_ephemeral(ctx, refusal).await?;
        return Ok(None);
    }
    Ok(Some(guild_id))
}
