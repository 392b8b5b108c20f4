//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are filtered case-insensitively on what the user has typed so
//! far and capped at Discord's limit of 25 entries.

use crate::{
    bot::BotData,
    core::{clan, connect4::CLOCK_TIMES, shop::ToolType},
    errors::Error,
};

const MAX_SUGGESTIONS: usize = 25;

fn matches(candidate: &str, partial: &str) -> bool {
    candidate.to_lowercase().contains(&partial.to_lowercase())
}

/// Suggests tool ids from the shop catalog.
pub async fn autocomplete_tool(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    tool_suggestions(partial)
}

fn tool_suggestions(partial: &str) -> Vec<String> {
    ToolType::ALL
        .iter()
        .filter(|tool| matches(tool.item_id(), partial) || matches(tool.name(), partial))
        .map(|tool| tool.item_id().to_string())
        .collect()
}

/// Suggests clan names of the current guild.
pub async fn autocomplete_clan_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Some(guild_id) = ctx.guild_id() else {
        return Vec::new();
    };
    let Ok(clans) = clan::list_clans(&ctx.data().database, &guild_id.to_string()).await else {
        return Vec::new();
    };

    let mut matching: Vec<String> = clans
        .into_iter()
        .filter(|c| matches(&c.name, partial))
        .map(|c| c.name)
        .take(MAX_SUGGESTIONS)
        .collect();
    matching.sort();
    matching
}

/// Suggests Connect Four clock choices.
pub async fn autocomplete_clock(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    clock_suggestions(partial)
}

fn clock_suggestions(partial: &str) -> Vec<String> {
    CLOCK_TIMES
        .iter()
        .filter(|(label, _)| matches(label, partial))
        .map(|(label, _)| (*label).to_string())
        .collect()
}

/// Converts a clock label (or a plain number of seconds) to seconds.
#[must_use]
pub fn parse_clock(input: &str) -> Option<i64> {
    let input = input.trim();
    CLOCK_TIMES
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(input))
        .map(|(_, secs)| *secs)
        .or_else(|| input.parse().ok())
}
