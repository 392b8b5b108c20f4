//! Shop commands - `/shop list`, `/shop buy` and `/inventory`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{autocomplete, guards, inventory::inventory_view, respond},
            views,
        },
        core::{
            format::format_currency,
            shop::{self, ToolType},
            wallet,
        },
        errors::{Error, Result},
    };

    /// Buy tools with the money you earn.
    #[poise::command(slash_command, subcommands("shop_list", "shop_buy"))]
    pub async fn shop(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Use `/shop list` to browse and `/shop buy <tool>` to buy.")
            .await?;
        Ok(())
    }

    /// Lists the tools for sale.
    #[poise::command(slash_command, rename = "list")]
    pub async fn shop_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if guards::require_economy_channel(ctx).await?.is_none() {
            return Ok(());
        }
        ctx.send(poise::CreateReply::default().embed(views::shop_embed()))
            .await?;
        Ok(())
    }

    /// Buys a tool from the shop.
    #[poise::command(slash_command, rename = "buy")]
    pub async fn shop_buy(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tool to buy"]
        #[autocomplete = "autocomplete::autocomplete_tool"]
        tool: String,
    ) -> Result<()> {
        let Some(guild_id) = guards::require_economy_channel(ctx).await? else {
            return Ok(());
        };
        let Some(tool) = ToolType::parse(&tool) else {
            respond::say_ephemeral(ctx, format!("❌ There is no tool called '{tool}'.")).await?;
            return Ok(());
        };

        let db = &ctx.data().database;
        let wallet = wallet::get_or_create_wallet(db, &ctx.author().id.to_string(), &guild_id).await?;

        match shop::buy_tool(db, wallet.id, tool).await {
            Ok(_) => {
                ctx.say(format!(
                    "✅ You bought a {} for {}.",
                    tool.label(),
                    format_currency(tool.price())
                ))
                .await?;
            }
            Err(e @ (Error::InsufficientFunds { .. } | Error::ItemAlreadyOwned { .. })) => {
                respond::say_ephemeral(ctx, respond::user_message(&e)).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Shows your tools. Pick one from the menu to dispose of it.
    #[poise::command(slash_command)]
    pub async fn inventory(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = guards::require_economy_channel(ctx).await? else {
            return Ok(());
        };

        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();
        let wallet = wallet::get_or_create_wallet(db, &user_id, &guild_id).await?;

        let (embed, components) = inventory_view(db, &user_id, &guild_id, wallet.id).await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(embed)
                .components(components)
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
