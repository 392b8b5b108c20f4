//! Reply helpers shared by commands and component handlers.
//!
//! Component handlers return a [`ComponentReply`] instead of talking to Discord
//! themselves; the dispatcher sends it with [`send_reply`].

use crate::{
    bot::BotData,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::error;

/// Message shown for failures the user cannot fix.
pub const CONTACT_DEVELOPER: &str = "Something went wrong. Contact Developer.";

/// Reply when a select-menu record is triggered by another component kind.
pub const SELECT_MENU_ONLY: &str = "This interaction is only available as string menu select.";

/// Reply when a button record is triggered by another component kind.
pub const BUTTON_ONLY: &str = "This interaction is only available as a button.";

/// New content for the message a component is attached to.
#[derive(Debug, Clone, Default)]
pub struct ComponentUpdate {
    /// Message text, empty to clear it
    pub content: String,
    /// Replaces all embeds; `None` removes them
    pub embed: Option<serenity::CreateEmbed>,
    /// Replaces all component rows
    pub components: Vec<serenity::CreateActionRow>,
}

/// What a component handler wants shown.
#[derive(Debug, Clone)]
pub enum ComponentReply {
    /// Replace the message the component is attached to
    Update(ComponentUpdate),
    /// Tell only the user who pressed it
    Ephemeral(String),
}

impl ComponentReply {
    /// Ephemeral text reply.
    #[must_use]
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::Ephemeral(content.into())
    }
}

/// Values picked in a string select menu, `None` for any other component kind.
#[must_use]
pub fn selected_values(kind: &serenity::ComponentInteractionDataKind) -> Option<&[String]> {
    match kind {
        serenity::ComponentInteractionDataKind::StringSelect { values } => Some(values.as_slice()),
        _ => None,
    }
}

/// Whether the component is a button.
#[must_use]
pub fn is_button(kind: &serenity::ComponentInteractionDataKind) -> bool {
    matches!(kind, serenity::ComponentInteractionDataKind::Button)
}

/// Turns an error into the text shown to the user.
///
/// Domain errors explain themselves; infrastructure errors are logged and hidden
/// behind [`CONTACT_DEVELOPER`].
#[must_use]
pub fn user_message(error: &Error) -> String {
    match error {
        Error::InsufficientFunds { current, required } => format!(
            "❌ You don't have enough money. You have {} but need {}.",
            crate::core::format::format_currency(*current),
            crate::core::format::format_currency(*required)
        ),
        Error::ItemAlreadyOwned { name } => format!("❌ You already own a {name}."),
        Error::ItemNotFound { .. } => "Cannot find selected tool. Contact Developer.".to_string(),
        Error::ClanNotFound { name } => format!("❌ No clan named **{name}** exists here."),
        Error::ClanNameTaken { name } => format!("❌ A clan named **{name}** already exists."),
        Error::AlreadyInClan { clan } => format!("❌ You are already in **{clan}**."),
        Error::NotInClan => "❌ You are not in a clan.".to_string(),
        Error::NotClanOwner => "❌ Only the clan owner can do that.".to_string(),
        Error::OwnerCannotLeave => {
            "❌ The clan owner cannot leave. Disband the clan instead.".to_string()
        }
        Error::ClanMaxLevel { level } => {
            format!("❌ Your clan is already at the maximum level ({level}).")
        }
        Error::InvalidMove { message } => format!("❌ {message}"),
        Error::GameNotFound { .. } => "❌ This game no longer exists.".to_string(),
        Error::InteractionNotFound { .. } => "This interaction has expired.".to_string(),
        Error::Json(_) => "Invalid interaction context".to_string(),
        Error::Config { message } => format!("❌ {message}"),
        Error::InvalidAmount { amount } => format!("❌ Invalid amount: {amount}"),
        other => {
            error!("Unexpected error: {:?}", other);
            CONTACT_DEVELOPER.to_string()
        }
    }
}

/// Replies to a command with a message only the invoker sees.
pub async fn say_ephemeral(
    ctx: poise::Context<'_, BotData, Error>,
    content: impl Into<String>,
) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Sends an ephemeral message in response to a component interaction.
pub async fn component_ephemeral(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    content: impl Into<String>,
) -> Result<()> {
    let response = serenity::CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);

    component
        .create_response(ctx, serenity::CreateInteractionResponse::Message(response))
        .await?;
    Ok(())
}

/// Replaces the message the component is attached to.
pub async fn update_component_message(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    message: serenity::CreateInteractionResponseMessage,
) -> Result<()> {
    component
        .create_response(ctx, serenity::CreateInteractionResponse::UpdateMessage(message))
        .await?;
    Ok(())
}

/// Sends what a component handler returned.
pub async fn send_reply(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    reply: ComponentReply,
) -> Result<()> {
    match reply {
        ComponentReply::Ephemeral(content) => component_ephemeral(ctx, component, content).await,
        ComponentReply::Update(update) => {
            let message = serenity::CreateInteractionResponseMessage::new()
                .content(update.content)
                .embeds(update.embed.into_iter().collect())
                .components(update.components);
            update_component_message(ctx, component, message).await
        }
    }
}
