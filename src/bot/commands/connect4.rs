//! `/connect4` - challenge another member to Connect Four.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, connect4::challenge_view, guards, respond},
        },
        core::connect4::game::{self, NewChallenge},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Challenges a member to Connect Four.
    #[poise::command(slash_command)]
    pub async fn connect4(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Who to play against"] opponent: serenity::User,
        #[description = "Time each player has per move"]
        #[autocomplete = "autocomplete::autocomplete_clock"]
        clock: String,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_guild(ctx).await? else {
            return Ok(());
        };
        if opponent.bot {
            respond::say_ephemeral(ctx, "❌ Bots don't play Connect Four.").await?;
            return Ok(());
        }
        let Some(clock_secs) = autocomplete::parse_clock(&clock) else {
            respond::say_ephemeral(ctx, "❌ Pick one of the suggested clock times.").await?;
            return Ok(());
        };

        let db = &ctx.data().database;
        let challenger_id = ctx.author().id.to_string();
        let opponent_id = opponent.id.to_string();
        let channel_id = ctx.channel_id().to_string();

        let challenge = NewChallenge {
            guild_id: &guild_id,
            channel_id: &channel_id,
            challenger_id: &challenger_id,
            opponent_id: &opponent_id,
            clock_secs,
        };
        let created = match game::create_challenge(db, challenge, chrono::Utc::now()).await {
            Ok(created) => created,
            Err(e @ (Error::InvalidMove { .. } | Error::Config { .. })) => {
                respond::say_ephemeral(ctx, respond::user_message(&e)).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let (content, components) = challenge_view(db, &created).await?;
        ctx.send(
            poise::CreateReply::default()
                .content(content)
                .components(components),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
