use super::board::{Board, Column, GameState, Slot, SlotState};
use thiserror::Error;

/// Message shown when a column has no free slot.
pub const COLUMN_FULL_MESSAGE: &str = "This column is full.";

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
const CONNECT: usize = 4;

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Every slot of the column holds a disc
    #[error("This column is full.")]
    ColumnFull,
    /// Column index outside the board
    #[error("This column does not exist.")]
    NoSuchColumn,
    /// The game has been won or drawn
    #[error("This game is already over.")]
    GameOver,
}

impl From<MoveError> for crate::errors::Error {
    fn from(value: MoveError) -> Self {
        Self::InvalidMove {
            message: value.to_string(),
        }
    }
}

/// Free slot found by [`check_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableSlot {
    /// Index into `Board::slots`
    pub column_index: usize,
    /// Lowest empty row of that column
    pub slot_index: usize,
}

/// Finds the lowest empty slot of a column.
///
/// # Errors
/// `ColumnFull` when every slot is taken, `NoSuchColumn` for a board narrower
/// than the column.
pub fn check_column(board: &Board, column: Column) -> Result<AvailableSlot, MoveError> {
    let column_index = column.index();
    let slots = board.slots.get(column_index).ok_or(MoveError::NoSuchColumn)?;

    slots
        .iter()
        .position(|slot| slot.state == SlotState::Empty)
        .map(|slot_index| AvailableSlot {
            column_index,
            slot_index,
        })
        .ok_or(MoveError::ColumnFull)
}

/// Drops the current player's disc into `column` and returns the next board.
///
/// The input board is left untouched. The returned board has the turn passed to
/// the other player, or a finished state when the move connected four or filled
/// the board.
///
/// # Errors
/// `GameOver` on a finished board, otherwise the errors of [`check_column`].
pub fn make_move(board: &Board, column: Column) -> Result<Board, MoveError> {
    let state = board.state();
    if state.is_finished() {
        return Err(MoveError::GameOver);
    }

    let AvailableSlot {
        column_index,
        slot_index,
    } = check_column(board, column)?;

    let (disc, next_turn, win) = if state == GameState::RedTurn {
        (SlotState::Red, GameState::YellowTurn, GameState::RedWin)
    } else {
        (SlotState::Yellow, GameState::RedTurn, GameState::YellowWin)
    };

    let mut next = board.clone();
    next.slots[column_index][slot_index].state = disc;
    let move_count = board.move_count.unwrap_or(0) + 1;
    next.move_count = Some(move_count);

    if let Some(line) = winning_line(&next, column_index, slot_index) {
        next.game_state = Some(win);
        next.winning_slots = Some(line);
    } else if is_full(&next) {
        next.game_state = Some(GameState::Draw);
    } else {
        next.game_state = Some(next_turn);
    }

    Ok(next)
}

fn is_full(board: &Board) -> bool {
    board
        .slots
        .iter()
        .flatten()
        .all(|slot| slot.state != SlotState::Empty)
}

fn slot_at(board: &Board, x: isize, y: isize) -> Option<&Slot> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    board.slots.get(x)?.get(y)
}

/// Returns the run of at least four same-coloured slots through `(x, y)`, if any.
fn winning_line(board: &Board, x: usize, y: usize) -> Option<Vec<Slot>> {
    let origin = *board.slots.get(x)?.get(y)?;
    if origin.state == SlotState::Empty {
        return None;
    }
    let (ox, oy) = (isize::try_from(x).ok()?, isize::try_from(y).ok()?);

    for (dx, dy) in DIRECTIONS {
        let mut line = vec![origin];

        for sign in [1, -1] {
            let mut step = 1;
            while let Some(slot) = slot_at(board, ox + dx * step * sign, oy + dy * step * sign) {
                if slot.state != origin.state {
                    break;
                }
                line.push(*slot);
                step += 1;
            }
        }

        if line.len() >= CONNECT {
            line.sort_by_key(|s| (s.x, s.y));
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::connect4::board::ROWS;

    fn play(columns: &[Column]) -> Board {
        columns
            .iter()
            .fold(Board::new(), |board, column| make_move(&board, *column).unwrap())
    }

    #[test]
    fn test_first_move_lands_at_bottom_and_passes_turn() {
        let board = Board::new();
        let next = make_move(&board, Column::D).unwrap();

        assert_eq!(next.slot(3, 0), Some(SlotState::Red));
        assert_eq!(next.state(), GameState::YellowTurn);
        assert_eq!(next.move_count, Some(1));
        // Input is untouched
        assert_eq!(board.slot(3, 0), Some(SlotState::Empty));
    }

    #[test]
    fn test_discs_stack_and_alternate() {
        let board = play(&[Column::A, Column::A, Column::A]);
        assert_eq!(board.slot(0, 0), Some(SlotState::Red));
        assert_eq!(board.slot(0, 1), Some(SlotState::Yellow));
        assert_eq!(board.slot(0, 2), Some(SlotState::Red));
        assert_eq!(board.state(), GameState::YellowTurn);
    }

    #[test]
    fn test_column_full() {
        let board = play(&[Column::B; ROWS]);
        assert_eq!(check_column(&board, Column::B), Err(MoveError::ColumnFull));
        assert_eq!(make_move(&board, Column::B), Err(MoveError::ColumnFull));
        assert_eq!(MoveError::ColumnFull.to_string(), COLUMN_FULL_MESSAGE);
    }

    #[test]
    fn test_horizontal_win() {
        use Column::{A, B, C, D};
        let board = play(&[A, A, B, B, C, C, D]);
        assert_eq!(board.state(), GameState::RedWin);
        let winning = board.winning_slots.unwrap();
        assert_eq!(winning.len(), 4);
        assert!(winning.iter().all(|s| s.y == 0 && s.state == SlotState::Red));
    }

    #[test]
    fn test_vertical_win_for_yellow() {
        use Column::{A, B, G};
        let board = play(&[G, A, B, A, B, A, G, A]);
        assert_eq!(board.state(), GameState::YellowWin);
        let winning = board.winning_slots.unwrap();
        assert!(winning.iter().all(|s| s.x == 0));
    }

    #[test]
    fn test_diagonal_win() {
        use Column::{A, B, C, D};
        // Red builds a rising diagonal A1 B2 C3 D4
        let board = play(&[A, B, B, C, C, D, C, D, D, A, D]);
        assert_eq!(board.state(), GameState::RedWin);
        let mut cells: Vec<(usize, usize)> = board
            .winning_slots
            .unwrap()
            .iter()
            .map(|s| (s.x, s.y))
            .collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_moves_after_win_rejected() {
        use Column::{A, B, C, D};
        let board = play(&[A, A, B, B, C, C, D]);
        assert_eq!(make_move(&board, Column::G), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_on_full_board() {
        // Alternating columns, flipped for the top three rows: no four in a row.
        let mut board = Board::new();
        for x in 0..7 {
            for y in 0..ROWS {
                let red = (x % 2 == 0) ^ (y / 3 == 1);
                board.slots[x][y].state = if red { SlotState::Red } else { SlotState::Yellow };
            }
        }
        // Free the top of G and let the player to move fill it.
        board.slots[6][ROWS - 1].state = SlotState::Empty;
        board.game_state = Some(GameState::YellowTurn);
        board.move_count = Some(41);

        let next = make_move(&board, Column::G).unwrap();
        assert_eq!(next.state(), GameState::Draw);
        assert_eq!(next.move_count, Some(42));
        assert!(next.winning_slots.is_none());
    }

    #[test]
    fn test_missing_column_on_narrow_board() {
        let mut board = Board::new();
        board.slots.truncate(3);
        assert_eq!(make_move(&board, Column::E), Err(MoveError::NoSuchColumn));
    }
}
