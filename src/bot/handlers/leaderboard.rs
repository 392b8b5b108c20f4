//! Leaderboard paging.
//!
//! Paging buttons use the legacy `LEADERBOARD_CHANGE_PAGE+<page>` custom id, so
//! they need no interaction record and keep working for anyone in the guild.

use crate::{
    bot::{BotData, handlers::respond, views},
    core::{router::INVALID_BUTTON_ACTION, wallet},
    errors::Result,
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;

/// Embed and paging buttons for one leaderboard page.
pub async fn leaderboard_view(
    db: &DatabaseConnection,
    guild_id: &str,
    page: u64,
    page_size: u64,
) -> Result<(serenity::CreateEmbed, Vec<serenity::CreateActionRow>)> {
    let page = wallet::leaderboard_page(db, guild_id, page, page_size).await?;
    Ok((views::leaderboard_embed(&page)?, views::leaderboard_buttons(&page)))
}

/// `LEADERBOARD_CHANGE_PAGE+<page>` button.
pub async fn change_page(
    ctx: &serenity::Context,
    data: &BotData,
    component: &serenity::ComponentInteraction,
    page: &str,
) -> Result<()> {
    let (Ok(page), Some(guild_id)) = (page.parse::<u64>(), component.guild_id) else {
        return respond::component_ephemeral(ctx, component, INVALID_BUTTON_ACTION).await;
    };

    let (embed, components) = leaderboard_view(
        &data.database,
        &guild_id.to_string(),
        page,
        data.settings.leaderboard.page_size,
    )
    .await?;

    respond::update_component_message(
        ctx,
        component,
        serenity::CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(components),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_leaderboard_view_lists_richest_first() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "poor", 10).await?;
        create_test_wallet(&db, "rich", 9_000).await?;

        let (embed, buttons) = leaderboard_view(&db, TEST_GUILD, 0, 10).await?;
        assert!(buttons.is_empty());

        let json = serde_json::to_value(&embed)?;
        let description = json["description"].as_str().unwrap_or_default();
        let rich = description.find("<@rich>");
        let poor = description.find("<@poor>");
        assert!(rich.is_some() && poor.is_some());
        assert!(rich < poor);
        assert!(description.starts_with("🥇 **#1** <@rich> $9,000"));
        Ok(())
    }
}
