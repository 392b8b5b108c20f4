//! Component interaction dispatch.
//!
//! Every button or select menu press arrives here through the framework event
//! handler. Legacy `ACTION+DATA` custom ids go to their action handler; any
//! other custom id is looked up as an interaction record, access-checked and
//! handed to the handler its type names.

use crate::{
    bot::{
        BotData,
        handlers::{connect4, inventory, leaderboard, respond},
    },
    core::{
        interaction::{self, InteractionType},
        router::{self, ButtonAction, INVALID_BUTTON_ACTION, Route},
    },
    entities::interaction as interaction_entity,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{debug, error, warn};

/// Reply when the interaction record no longer exists.
pub const EXPIRED_MESSAGE: &str = "This interaction has expired.";

/// Framework event handler; only component interactions are of interest.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    let serenity::FullEvent::InteractionCreate { interaction } = event else {
        return Ok(());
    };
    let Some(component) = interaction.as_message_component() else {
        return Ok(());
    };

    if let Err(e) = handle_component(ctx, data, component).await {
        error!(
            "Error handling component '{}': {:?}",
            component.data.custom_id, e
        );
        let message = respond::user_message(&e);
        if let Err(e) = respond::component_ephemeral(ctx, component, message).await {
            error!("Failed to send error message: {}", e);
        }
    }
    Ok(())
}

async fn handle_component(
    ctx: &serenity::Context,
    data: &BotData,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    let custom_id = component.data.custom_id.as_str();
    debug!("Component interaction '{}' from {}", custom_id, component.user.id);

    match router::route(custom_id) {
        Route::Invalid => respond::component_ephemeral(ctx, component, INVALID_BUTTON_ACTION).await,
        Route::Action {
            action: ButtonAction::LeaderboardChangePage,
            data: page,
        } => leaderboard::change_page(ctx, data, component, page).await,
        Route::Record(id) => handle_record(ctx, data, component, id).await,
    }
}

async fn handle_record(
    ctx: &serenity::Context,
    data: &BotData,
    component: &serenity::ComponentInteraction,
    id: &str,
) -> Result<()> {
    let Some(record) = interaction::get_interaction(&data.database, id).await? else {
        return respond::component_ephemeral(ctx, component, EXPIRED_MESSAGE).await;
    };

    let user_id = component.user.id.to_string();
    let guild_id = component.guild_id.map(|g| g.to_string());
    if let Err(denied) = interaction::check_access(&record, &user_id, guild_id.as_deref()) {
        return respond::component_ephemeral(ctx, component, denied.message()).await;
    }

    dispatch(ctx, data, component, &record).await
}

async fn dispatch(
    ctx: &serenity::Context,
    data: &BotData,
    component: &serenity::ComponentInteraction,
    record: &interaction_entity::Model,
) -> Result<()> {
    let Some(kind) = InteractionType::parse(&record.interaction_type) else {
        warn!("Unknown interaction type '{}'", record.interaction_type);
        return respond::component_ephemeral(ctx, component, EXPIRED_MESSAGE).await;
    };

    let db = &data.database;
    let data_kind = &component.data.kind;
    let now = chrono::Utc::now();
    let reply = match kind {
        InteractionType::InventoryDisposeMenu => {
            inventory::handle_dispose_menu(db, record, data_kind).await?
        }
        InteractionType::InventoryDisposeToolAccept => {
            inventory::handle_dispose_accept(db, record, data_kind).await?
        }
        InteractionType::InventoryDisposeToolDecline => {
            inventory::handle_dispose_decline(db, record, data_kind).await?
        }
        InteractionType::Connect4Accept => connect4::handle_accept(db, record, data_kind, now).await?,
        InteractionType::Connect4Decline => connect4::handle_decline(db, record, data_kind).await?,
        InteractionType::Connect4Move => connect4::handle_move(db, record, data_kind, now).await?,
        InteractionType::Connect4ClaimWin => {
            connect4::handle_claim_win(db, record, data_kind, now).await?
        }
    };
    respond::send_reply(ctx, component, reply).await
}
