//! Embed and component builders.
//!
//! Pure functions from core results to serenity builders. Interaction records are
//! created by the handlers; views only receive their ids.

use crate::{
    core::{
        connect4::{Board, Column, check_column},
        format::format_currency,
        mine::{self, MineReport},
        router::ButtonAction,
        shop::{self, ToolType},
        wallet::LeaderboardPage,
    },
    entities::{clan, clan_member, shop_item},
    errors::Result,
};
use poise::serenity_prelude as serenity;
use std::fmt::Write;

/// Green, used for gains and confirmations
pub const SUCCESS_COLOR: u32 = 0x002E_CC71;
/// Red, used for losses
pub const FAILURE_COLOR: u32 = 0x00E7_4C3C;
/// Blue, used for neutral listings
pub const INFO_COLOR: u32 = 0x0034_98DB;

/// Buttons per action row allowed by Discord
const BUTTONS_PER_ROW: usize = 5;

/// Embed shown after a mine trip.
#[must_use]
pub fn mine_embed(report: &MineReport) -> serenity::CreateEmbed {
    let color = if report.is_success() {
        SUCCESS_COLOR
    } else {
        FAILURE_COLOR
    };
    let embed = serenity::CreateEmbed::new()
        .title(&report.title)
        .description(&report.description)
        .color(color)
        .field("Balance", format_currency(report.balance), true);

    match &report.footer {
        Some(footer) => embed.footer(serenity::CreateEmbedFooter::new(footer)),
        None => embed,
    }
}

/// Inventory listing embed.
///
/// # Errors
/// Only fails if formatting the listing fails.
pub fn inventory_embed(owner_id: &str, items: &[shop_item::Model]) -> Result<serenity::CreateEmbed> {
    Ok(serenity::CreateEmbed::new()
        .title("🎒 Inventory")
        .description(format!("<@{owner_id}>\n\n{}", shop::format_inventory(items)?))
        .color(INFO_COLOR))
}

/// Select menu listing owned tools; the values are the shop item ids.
#[must_use]
pub fn dispose_menu(record_id: &str, items: &[shop_item::Model]) -> serenity::CreateActionRow {
    let options = items
        .iter()
        .map(|item| {
            let label = ToolType::from_item_id(&item.item_id)
                .map_or_else(|| item.item_id.clone(), ToolType::label);
            serenity::CreateSelectMenuOption::new(label, &item.id)
        })
        .collect();

    serenity::CreateActionRow::SelectMenu(
        serenity::CreateSelectMenu::new(record_id, serenity::CreateSelectMenuKind::String { options })
            .placeholder("Select a tool to dispose"),
    )
}

/// Accept/Decline button pair.
#[must_use]
pub fn confirm_buttons(accept_id: &str, decline_id: &str) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(accept_id)
            .label("Accept")
            .style(serenity::ButtonStyle::Success),
        serenity::CreateButton::new(decline_id)
            .label("Decline")
            .style(serenity::ButtonStyle::Danger),
    ])
}

/// Shop catalog embed.
#[must_use]
pub fn shop_embed() -> serenity::CreateEmbed {
    let fields = ToolType::ALL.iter().map(|tool| {
        (
            format!("{} {}", tool.emoji(), tool.name()),
            format!("{}\n`/shop buy {}`", format_currency(tool.price()), tool.item_id()),
            true,
        )
    });
    serenity::CreateEmbed::new()
        .title("🛒 Shop")
        .color(INFO_COLOR)
        .fields(fields)
}

/// Leaderboard page embed.
///
/// # Errors
/// Only fails if writing to the description fails.
pub fn leaderboard_embed(page: &LeaderboardPage) -> Result<serenity::CreateEmbed> {
    let mut description = String::new();
    if page.wallets.is_empty() {
        description.push_str("Nobody has any money yet. Try `/mine`!");
    }
    for (rank, wallet) in (page.first_rank..).zip(&page.wallets) {
        let medal = match rank {
            1 => "🥇",
            2 => "🥈",
            3 => "🥉",
            _ => "▫️",
        };
        writeln!(
            description,
            "{medal} **#{rank}** <@{}> {}",
            wallet.user_discord_id,
            format_currency(wallet.balance)
        )?;
    }

    Ok(serenity::CreateEmbed::new()
        .title("🏆 Leaderboard")
        .description(description)
        .color(INFO_COLOR)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page.page + 1,
            page.total_pages
        ))))
}

/// Previous/next buttons, or nothing when there is a single page.
#[must_use]
pub fn leaderboard_buttons(page: &LeaderboardPage) -> Vec<serenity::CreateActionRow> {
    if page.total_pages <= 1 {
        return Vec::new();
    }
    let action = ButtonAction::LeaderboardChangePage;
    let previous = page.page.saturating_sub(1);
    let next = (page.page + 1).min(page.total_pages - 1);

    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(action.custom_id(&format!("{previous}")))
            .label("◀ Previous")
            .style(serenity::ButtonStyle::Secondary)
            .disabled(page.page == 0),
        serenity::CreateButton::new(action.custom_id(&format!("{next}")))
            .label("Next ▶")
            .style(serenity::ButtonStyle::Secondary)
            .disabled(page.page + 1 >= page.total_pages),
    ])]
}

/// Clan overview embed.
#[must_use]
pub fn clan_embed(clan: &clan::Model, members: &[clan_member::Model], next_upgrade: Option<i64>) -> serenity::CreateEmbed {
    let member_list = members
        .iter()
        .map(|m| format!("<@{}>", m.discord_user_id))
        .collect::<Vec<_>>()
        .join(", ");
    let upgrade = next_upgrade.map_or_else(|| "Max level".to_string(), format_currency);
    let notifications = clan
        .notification_channel_id
        .as_ref()
        .map_or_else(|| "Not set".to_string(), |id| format!("<#{id}>"));

    serenity::CreateEmbed::new()
        .title(format!("🛡️ {}", clan.name))
        .color(INFO_COLOR)
        .field("Owner", format!("<@{}>", clan.owner_discord_id), true)
        .field("Level", clan.level.to_string(), true)
        .field("Mine bonus", format!("{}%", mine::clan_bonus_percent(clan.level)), true)
        .field("Next upgrade", upgrade, true)
        .field("Notifications", notifications, true)
        .field(format!("Members ({})", members.len()), member_list, false)
}

/// Column buttons for a running game. Full columns are disabled.
#[must_use]
pub fn connect4_move_rows(board: &Board, buttons: &[(Column, String)]) -> Vec<serenity::CreateActionRow> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| {
            serenity::CreateActionRow::Buttons(
                chunk
                    .iter()
                    .map(|(column, id)| {
                        serenity::CreateButton::new(id)
                            .label(column.letter())
                            .style(serenity::ButtonStyle::Primary)
                            .disabled(check_column(board, *column).is_err())
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Button the waiting player presses to win once the opponent's clock runs out.
#[must_use]
pub fn connect4_claim_row(claim_id: &str) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(claim_id)
            .label("Claim win on time")
            .style(serenity::ButtonStyle::Secondary),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(json: &'a serde_json::Value, name: &str) -> Option<&'a str> {
        json["fields"]
            .as_array()?
            .iter()
            .find(|f| f["name"] == name)?
            .get("value")?
            .as_str()
    }

    #[test]
    fn test_clan_embed_bonus_follows_level() -> Result<()> {
        let clan = clan::Model {
            id: 1,
            name: "Miners".to_string(),
            discord_guild_id: "guild".to_string(),
            owner_discord_id: "owner".to_string(),
            level: 3,
            notification_channel_id: None,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(clan_embed(&clan, &[], Some(300_000)))?;
        assert_eq!(field(&json, "Mine bonus"), Some("15%"));
        assert_eq!(field(&json, "Notifications"), Some("Not set"));
        Ok(())
    }

    #[test]
    fn test_leaderboard_embed_ranks_and_footer() -> Result<()> {
        let page = LeaderboardPage {
            wallets: Vec::new(),
            page: 1,
            total_pages: 3,
            first_rank: 11,
        };
        let json = serde_json::to_value(leaderboard_embed(&page)?)?;
        assert_eq!(json["footer"]["text"], "Page 2/3");
        assert!(
            json["description"]
                .as_str()
                .is_some_and(|d| d.contains("Try `/mine`"))
        );
        Ok(())
    }
}
