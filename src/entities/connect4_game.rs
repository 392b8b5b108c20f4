//! Connect Four game entity.
//!
//! The board is stored as JSON so the pure move logic can round-trip it without
//! a table per slot. The challenger always plays red and moves first.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Connect Four game database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "connect4_games")]
pub struct Model {
    /// Unique identifier (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Discord guild ID
    pub guild_id: String,
    /// Discord channel ID the game is played in
    pub channel_id: String,
    /// Challenger, plays red
    pub red_player_id: String,
    /// Opponent, plays yellow
    pub yellow_player_id: String,
    /// Serialized board state
    #[sea_orm(column_type = "Text")]
    pub board: String,
    /// Seconds each player has per move
    pub clock_secs: i64,
    /// Whether the opponent accepted the challenge
    pub accepted: bool,
    /// Time of the last move, or of acceptance before the first move
    pub last_move_at: DateTimeUtc,
    /// When the challenge was issued
    pub created_at: DateTimeUtc,
}

/// `Connect4Game` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
