//! Economy commands - `/mine`, `/balance` and `/leaderboard`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{guards, leaderboard::leaderboard_view},
            views,
        },
        core::{
            format::format_currency,
            mine::{self, MineResult},
            wallet,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rand::{SeedableRng, rngs::StdRng};

    /// Go mining. Each trip can earn (or cost) money.
    #[poise::command(slash_command)]
    pub async fn mine(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = guards::require_economy_channel(ctx).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let mut rng = StdRng::from_os_rng();

        let result = mine::mine(
            &data.database,
            &data.settings.mine,
            &user_id,
            &guild_id,
            chrono::Utc::now(),
            &mut rng,
        )
        .await?;

        match result {
            MineResult::Mined(report) => {
                ctx.send(poise::CreateReply::default().embed(views::mine_embed(&report)))
                    .await?;
            }
            MineResult::TooTired { available_at } => {
                ctx.send(
                    poise::CreateReply::default()
                        .content(MineResult::too_tired_message(available_at))
                        .ephemeral(true),
                )
                .await?;
            }
        }
        Ok(())
    }

    /// Shows your wallet balance, or another member's.
    #[poise::command(slash_command)]
    pub async fn balance(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to look up (defaults to you)"] user: Option<serenity::User>,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_economy_channel(ctx).await? else {
            return Ok(());
        };

        let target = user.as_ref().unwrap_or_else(|| ctx.author());
        let balance = wallet::get_wallet(&ctx.data().database, &target.id.to_string(), &guild_id)
            .await?
            .map_or(0, |w| w.balance);

        let embed = serenity::CreateEmbed::new()
            .title("💰 Balance")
            .description(format!("<@{}> has **{}**", target.id, format_currency(balance)))
            .color(views::INFO_COLOR);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Richest members of this server.
    #[poise::command(slash_command)]
    pub async fn leaderboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = guards::require_economy_channel(ctx).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let (embed, components) =
            leaderboard_view(&data.database, &guild_id, 0, data.settings.leaderboard.page_size)
                .await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(embed)
                .components(components),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
