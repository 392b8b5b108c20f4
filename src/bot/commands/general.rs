//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**EconBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Economy**\n\
        • `/mine` - Go mining for money. Limited uses per cooldown window.\n\
        • `/balance [user]` - Shows a wallet balance.\n\
        • `/leaderboard` - The richest members of this server.\n\n\
        **Shop**\n\
        • `/shop list` - Tools for sale.\n\
        • `/shop buy <tool>` - Buy a tool.\n\
        • `/inventory` - Your tools; dispose of them from the menu.\n\n\
        **Clans**\n\
        • `/clan create <name>` - Found a clan.\n\
        • `/clan join <name>` / `/clan leave` - Join or leave a clan.\n\
        • `/clan info [name]` - Clan overview.\n\
        • `/clan upgrade` - Raise your clan level for a bigger mine bonus (owner).\n\
        • `/clan channel [channel]` - Set the clan notification channel (owner).\n\
        • `/clan notify <message>` - Post to your clan's notification channel.\n\
        • `/clan disband` - Delete your clan (owner).\n\n\
        **Games**\n\
        • `/connect4 <opponent> <clock>` - Challenge someone to Connect Four.\n\n\
        **Admin**\n\
        • `/config economy_channel [channel]` - Restrict economy commands to one channel.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
