//! Server configuration commands. Require the Manage Server permission.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{guards, respond},
        },
        core::guild_config,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Server settings for EconBuddy.
    #[poise::command(
        slash_command,
        subcommands("config_economy_channel"),
        default_member_permissions = "MANAGE_GUILD",
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn config(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Use `/config economy_channel [channel]`.").await?;
        Ok(())
    }

    /// Restricts economy commands to one channel. Omit the channel to lift the restriction.
    #[poise::command(
        slash_command,
        rename = "economy_channel",
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn config_economy_channel(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Channel for economy commands"]
        #[channel_types("Text")]
        channel: Option<serenity::GuildChannel>,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };

        let channel_id = channel.map(|c| c.id.to_string());
        let updated =
            guild_config::set_economy_channel(&ctx.data().database, &guild_id, channel_id).await?;

        let message = updated.economy_channel_id.map_or_else(
            || "✅ Economy commands can now be used in any channel.".to_string(),
            |id| format!("✅ Economy commands are now restricted to <#{id}>."),
        );
        respond::say_ephemeral(ctx, message).await
    }
}

// Re-export all commands
pub use inner::*;
