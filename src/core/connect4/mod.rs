//! Connect Four: board model, pure move logic, and the persisted game service.

/// Board, slot and column types
pub mod board;
/// Challenge/accept/move lifecycle backed by the database
pub mod game;
/// Pure move application and win/draw detection
pub mod moves;

pub use board::{Board, Column, GameState, Slot, SlotState};
pub use moves::{MoveError, check_column, make_move};

/// Clock choices offered by `/connect4`, as `(label, seconds)`.
pub const CLOCK_TIMES: [(&str, i64); 5] = [
    ("30 seconds", 30),
    ("1 minute", 60),
    ("5 minutes", 5 * 60),
    ("10 minutes", 10 * 60),
    ("30 minutes", 30 * 60),
];

/// Whether `seconds` is one of the offered clock choices.
#[must_use]
pub fn is_valid_clock(seconds: i64) -> bool {
    CLOCK_TIMES.iter().any(|(_, secs)| *secs == seconds)
}
