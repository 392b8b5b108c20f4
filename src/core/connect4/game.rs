//! Persisted Connect Four games.
//!
//! A game starts as a challenge from the red player. Once the yellow player
//! accepts, players alternate moves; a player who takes longer than the game's
//! clock to move loses on time.

use super::{
    board::{Board, Column, GameState},
    is_valid_clock,
    moves::{MoveError, make_move},
};
use crate::{
    core::format::relative_timestamp,
    entities::{Connect4Game, connect4_game},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseTransaction, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Payload of every Connect Four interaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePayload {
    /// Id of the game row
    pub game_id: String,
    /// Column of a move button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
}

impl GamePayload {
    /// Payload of a challenge or claim button.
    #[must_use]
    pub fn new(game_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            column: None,
        }
    }

    /// Payload of the move button for `column`.
    #[must_use]
    pub fn with_column(game_id: &str, column: Column) -> Self {
        Self {
            game_id: game_id.to_string(),
            column: Some(column),
        }
    }
}

/// Parameters of a new challenge.
#[derive(Debug, Clone, Copy)]
pub struct NewChallenge<'a> {
    /// Guild the game is played in
    pub guild_id: &'a str,
    /// Channel the board message lives in
    pub channel_id: &'a str,
    /// Plays red and moves first
    pub challenger_id: &'a str,
    /// Plays yellow
    pub opponent_id: &'a str,
    /// Time allowed per move, one of [`super::CLOCK_TIMES`]
    pub clock_secs: i64,
}

/// Result of [`play_move`].
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Game row after the move
    pub game: connect4_game::Model,
    /// Board after the move
    pub board: Board,
    /// The player to move ran out of time and lost
    pub timed_out: bool,
}

fn invalid(message: &str) -> Error {
    Error::InvalidMove {
        message: message.to_string(),
    }
}

/// Parses the board stored in a game row.
///
/// # Errors
/// Returns `Error::Json` for a corrupt board column.
pub fn load_board(game: &connect4_game::Model) -> Result<Board> {
    serde_json::from_str(&game.board).map_err(Into::into)
}

/// Discord id of the player whose turn it is, `None` once the game is over.
#[must_use]
pub fn player_to_move<'a>(game: &'a connect4_game::Model, board: &Board) -> Option<&'a str> {
    match board.state() {
        GameState::RedTurn => Some(&game.red_player_id),
        GameState::YellowTurn => Some(&game.yellow_player_id),
        _ => None,
    }
}

/// When the player to move loses on time.
#[must_use]
pub fn move_deadline(game: &connect4_game::Model) -> DateTime<Utc> {
    game.last_move_at + chrono::Duration::seconds(game.clock_secs)
}

/// Status line shown under the board.
#[must_use]
pub fn status_line(game: &connect4_game::Model, board: &Board, timed_out: bool) -> String {
    let red = &game.red_player_id;
    let yellow = &game.yellow_player_id;
    let on_time = if timed_out { " on time" } else { "" };

    match board.state() {
        GameState::RedTurn => format!(
            "🔴 <@{red}>'s turn, move {}",
            relative_timestamp(move_deadline(game))
        ),
        GameState::YellowTurn => format!(
            "🟡 <@{yellow}>'s turn, move {}",
            relative_timestamp(move_deadline(game))
        ),
        GameState::RedWin => format!("🔴 <@{red}> won{on_time}!"),
        GameState::YellowWin => format!("🟡 <@{yellow}> won{on_time}!"),
        GameState::Draw => "It's a draw!".to_string(),
    }
}

/// Full message body: players, board and status.
#[must_use]
pub fn render_game(game: &connect4_game::Model, board: &Board, timed_out: bool) -> String {
    format!(
        "🔴 <@{}> vs 🟡 <@{}>\n{}\n{}",
        game.red_player_id,
        game.yellow_player_id,
        board.render(),
        status_line(game, board, timed_out)
    )
}

async fn find_game<C>(db: &C, game_id: &str) -> Result<connect4_game::Model>
where
    C: ConnectionTrait,
{
    Connect4Game::find_by_id(game_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::GameNotFound {
            id: game_id.to_string(),
        })
}

/// Loads a game by id.
pub async fn get_game(db: &DatabaseConnection, game_id: &str) -> Result<Option<connect4_game::Model>> {
    Connect4Game::find_by_id(game_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Stores a new, not yet accepted challenge. The challenger plays red.
#[instrument(skip(db))]
pub async fn create_challenge(
    db: &DatabaseConnection,
    challenge: NewChallenge<'_>,
    now: DateTime<Utc>,
) -> Result<connect4_game::Model> {
    if challenge.challenger_id == challenge.opponent_id {
        return Err(invalid("You cannot challenge yourself."));
    }
    if !is_valid_clock(challenge.clock_secs) {
        return Err(Error::Config {
            message: format!("Unsupported clock of {} seconds", challenge.clock_secs),
        });
    }

    let game = connect4_game::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        guild_id: Set(challenge.guild_id.to_string()),
        channel_id: Set(challenge.channel_id.to_string()),
        red_player_id: Set(challenge.challenger_id.to_string()),
        yellow_player_id: Set(challenge.opponent_id.to_string()),
        board: Set(serde_json::to_string(&Board::new())?),
        clock_secs: Set(challenge.clock_secs),
        accepted: Set(false),
        last_move_at: Set(now),
        created_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(
        "Connect4 challenge {} from {} to {}",
        game.id, game.red_player_id, game.yellow_player_id
    );
    Ok(game)
}

/// Opponent accepts; the clock for red's first move starts now.
#[instrument(skip(db))]
pub async fn accept_challenge(
    db: &DatabaseConnection,
    game_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<connect4_game::Model> {
    let game = find_game(db, game_id).await?;
    if game.yellow_player_id != user_id {
        return Err(invalid("Only the challenged player can accept."));
    }
    if game.accepted {
        return Err(invalid("This challenge was already accepted."));
    }

    let mut active: connect4_game::ActiveModel = game.into();
    active.accepted = Set(true);
    active.last_move_at = Set(now);
    let game = active.update(db).await?;

    info!("Connect4 game {} accepted", game.id);
    Ok(game)
}

/// Removes a pending challenge. Either player may call this; the challenger
/// withdraws, the opponent declines.
#[instrument(skip(db))]
pub async fn decline_challenge(
    db: &DatabaseConnection,
    game_id: &str,
    user_id: &str,
) -> Result<connect4_game::Model> {
    let game = find_game(db, game_id).await?;
    if game.red_player_id != user_id && game.yellow_player_id != user_id {
        return Err(invalid("You are not part of this challenge."));
    }
    if game.accepted {
        return Err(invalid("This challenge was already accepted."));
    }

    Connect4Game::delete_by_id(game.id.clone()).exec(db).await?;
    info!("Connect4 challenge {} declined by {}", game.id, user_id);
    Ok(game)
}

/// Plays `column` for `user_id`.
///
/// Once the deadline has passed no disc is placed: the call from either player
/// settles the game in favour of the player who was waiting, and the returned
/// outcome has `timed_out` set.
#[instrument(skip(db))]
pub async fn play_move(
    db: &DatabaseConnection,
    game_id: &str,
    user_id: &str,
    column: Column,
    now: DateTime<Utc>,
) -> Result<MoveOutcome> {
    let txn = db.begin().await?;
    let (game, board, to_move) = load_running_game(&txn, game_id, user_id).await?;

    if now > move_deadline(&game) {
        return settle_on_time(txn, game, board).await;
    }
    if to_move != user_id {
        return Err(invalid("It is not your turn."));
    }

    let next = make_move(&board, column)?;
    let mut active: connect4_game::ActiveModel = game.into();
    active.board = Set(serde_json::to_string(&next)?);
    active.last_move_at = Set(now);
    let game = active.update(&txn).await?;
    txn.commit().await?;

    if next.state().is_finished() {
        info!("Connect4 game {} finished: {:?}", game.id, next.state());
    }

    Ok(MoveOutcome {
        game,
        board: next,
        timed_out: false,
    })
}

/// Lets the waiting player win once the player to move has run out of time.
#[instrument(skip(db))]
pub async fn claim_win(
    db: &DatabaseConnection,
    game_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<MoveOutcome> {
    let txn = db.begin().await?;
    let (game, board, _) = load_running_game(&txn, game_id, user_id).await?;

    if now <= move_deadline(&game) {
        return Err(invalid("Your opponent still has time to move."));
    }
    settle_on_time(txn, game, board).await
}

/// Loads an accepted, unfinished game that `user_id` plays in, with the id of
/// the player to move.
async fn load_running_game<C>(
    db: &C,
    game_id: &str,
    user_id: &str,
) -> Result<(connect4_game::Model, Board, String)>
where
    C: ConnectionTrait,
{
    let game = find_game(db, game_id).await?;
    if !game.accepted {
        return Err(invalid("This challenge has not been accepted yet."));
    }
    if game.red_player_id != user_id && game.yellow_player_id != user_id {
        return Err(invalid("You are not playing in this game."));
    }

    let board = load_board(&game)?;
    let Some(to_move) = player_to_move(&game, &board).map(str::to_string) else {
        return Err(MoveError::GameOver.into());
    };
    Ok((game, board, to_move))
}

async fn settle_on_time(
    txn: DatabaseTransaction,
    game: connect4_game::Model,
    board: Board,
) -> Result<MoveOutcome> {
    let mut next = board;
    next.game_state = Some(if next.state() == GameState::RedTurn {
        GameState::YellowWin
    } else {
        GameState::RedWin
    });

    let mut active: connect4_game::ActiveModel = game.into();
    active.board = Set(serde_json::to_string(&next)?);
    let game = active.update(&txn).await?;
    txn.commit().await?;

    info!("Connect4 game {} won on time: {:?}", game.id, next.state());
    Ok(MoveOutcome {
        game,
        board: next,
        timed_out: true,
    })
}
