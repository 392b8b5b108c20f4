//! Connect Four buttons: accept, decline, column moves and claiming a win on time.
//!
//! Accept/Decline records belong to the challenged player. Every time the board
//! changes, all records of the game are replaced: column buttons for the player
//! to move and a claim button for the player waiting.

use crate::{
    bot::{
        handlers::respond::{self, ComponentReply, ComponentUpdate},
        views,
    },
    core::{
        connect4::{
            Board, Column,
            game::{self, GamePayload},
        },
        interaction::{self, InteractionType, NewInteraction},
    },
    entities::{connect4_game, interaction as interaction_entity},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;

/// Record types that carry a [`GamePayload`].
const GAME_RECORD_TYPES: [InteractionType; 4] = [
    InteractionType::Connect4Accept,
    InteractionType::Connect4Decline,
    InteractionType::Connect4Move,
    InteractionType::Connect4ClaimWin,
];

/// Deletes every button record of a game.
pub async fn clear_game_records(db: &DatabaseConnection, game_id: &str) -> Result<u64> {
    let fragment = format!(r#""gameId":"{game_id}""#);
    interaction::delete_containing_payload(db, &GAME_RECORD_TYPES, &fragment).await
}

/// Challenge message with Accept/Decline buttons for the opponent.
pub async fn challenge_view(
    db: &DatabaseConnection,
    game: &connect4_game::Model,
) -> Result<(String, Vec<serenity::CreateActionRow>)> {
    let payload = GamePayload::new(&game.id);
    let (accept, decline) = interaction::create_interaction_pair(
        db,
        NewInteraction::with_payload(
            InteractionType::Connect4Accept,
            &game.yellow_player_id,
            &game.guild_id,
            &payload,
        )?,
        NewInteraction::with_payload(
            InteractionType::Connect4Decline,
            &game.yellow_player_id,
            &game.guild_id,
            &payload,
        )?,
    )
    .await?;

    let content = format!(
        "<@{}>, <@{}> challenges you to Connect Four with a {} second clock!",
        game.yellow_player_id, game.red_player_id, game.clock_secs
    );
    Ok((content, vec![views::confirm_buttons(&accept.id, &decline.id)]))
}

/// Board message. While the game runs it carries column buttons for the player
/// to move and a claim button for the other player.
///
/// Records of the previous board message are deleted first.
pub async fn game_view(
    db: &DatabaseConnection,
    game: &connect4_game::Model,
    board: &Board,
    timed_out: bool,
) -> Result<(String, Vec<serenity::CreateActionRow>)> {
    clear_game_records(db, &game.id).await?;

    let content = game::render_game(game, board, timed_out);
    let Some(player) = game::player_to_move(game, board) else {
        return Ok((content, Vec::new()));
    };
    let waiting = if player == game.red_player_id {
        &game.yellow_player_id
    } else {
        &game.red_player_id
    };

    let mut new_records = Column::ALL
        .iter()
        .map(|column| {
            NewInteraction::with_payload(
                InteractionType::Connect4Move,
                player,
                &game.guild_id,
                &GamePayload::with_column(&game.id, *column),
            )
        })
        .collect::<Result<Vec<_>>>()?;
    new_records.push(NewInteraction::with_payload(
        InteractionType::Connect4ClaimWin,
        waiting,
        &game.guild_id,
        &GamePayload::new(&game.id),
    )?);
    let records = interaction::create_interactions(db, new_records).await?;

    let buttons: Vec<(Column, String)> = Column::ALL
        .into_iter()
        .zip(records.iter().map(|r| r.id.clone()))
        .collect();
    let mut rows = views::connect4_move_rows(board, &buttons);
    if let Some(claim) = records.get(Column::ALL.len()) {
        rows.push(views::connect4_claim_row(&claim.id));
    }
    Ok((content, rows))
}

fn board_reply(content: String, components: Vec<serenity::CreateActionRow>) -> ComponentReply {
    ComponentReply::Update(ComponentUpdate {
        content,
        embed: None,
        components,
    })
}

/// Opponent accepted: start the clock and show the empty board.
pub async fn handle_accept(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
    now: DateTime<Utc>,
) -> Result<ComponentReply> {
    if !respond::is_button(kind) {
        return Ok(ComponentReply::ephemeral(respond::BUTTON_ONLY));
    }
    let payload: GamePayload = interaction::parse_payload(record)?;

    let game = game::accept_challenge(db, &payload.game_id, &record.user_discord_id, now).await?;
    let board = game::load_board(&game)?;
    let (content, components) = game_view(db, &game, &board, false).await?;
    Ok(board_reply(content, components))
}

/// Opponent declined: drop the challenge.
pub async fn handle_decline(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
) -> Result<ComponentReply> {
    if !respond::is_button(kind) {
        return Ok(ComponentReply::ephemeral(respond::BUTTON_ONLY));
    }
    let payload: GamePayload = interaction::parse_payload(record)?;

    let game = game::decline_challenge(db, &payload.game_id, &record.user_discord_id).await?;
    clear_game_records(db, &game.id).await?;

    let content = format!(
        "<@{}> declined the Connect Four challenge from <@{}>.",
        game.yellow_player_id, game.red_player_id
    );
    Ok(board_reply(content, Vec::new()))
}

/// Column button pressed.
pub async fn handle_move(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
    now: DateTime<Utc>,
) -> Result<ComponentReply> {
    if !respond::is_button(kind) {
        return Ok(ComponentReply::ephemeral(respond::BUTTON_ONLY));
    }
    let payload: GamePayload = interaction::parse_payload(record)?;
    let column = payload.column.ok_or_else(|| Error::InvalidMove {
        message: "This button has no column.".to_string(),
    })?;

    let outcome =
        game::play_move(db, &payload.game_id, &record.user_discord_id, column, now).await?;
    let (content, components) =
        game_view(db, &outcome.game, &outcome.board, outcome.timed_out).await?;
    Ok(board_reply(content, components))
}

/// Claim button pressed by the waiting player.
pub async fn handle_claim_win(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
    now: DateTime<Utc>,
) -> Result<ComponentReply> {
    if !respond::is_button(kind) {
        return Ok(ComponentReply::ephemeral(respond::BUTTON_ONLY));
    }
    let payload: GamePayload = interaction::parse_payload(record)?;

    let outcome = game::claim_win(db, &payload.game_id, &record.user_discord_id, now).await?;
    let (content, components) =
        game_view(db, &outcome.game, &outcome.board, outcome.timed_out).await?;
    Ok(board_reply(content, components))
}
