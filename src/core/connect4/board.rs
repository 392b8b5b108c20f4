use serde::{Deserialize, Serialize};

/// Number of columns on the board
pub const COLUMNS: usize = 7;
/// Number of rows on the board
pub const ROWS: usize = 6;

/// Whose turn it is, or how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Red moves next
    RedTurn,
    /// Yellow moves next
    YellowTurn,
    /// Red connected four
    RedWin,
    /// Yellow connected four
    YellowWin,
    /// Board full without a winner
    Draw,
}

impl GameState {
    /// Whether the game has ended
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::RedWin | Self::YellowWin | Self::Draw)
    }
}

/// Content of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotState {
    /// No disc
    Empty,
    /// Red disc
    Red,
    /// Yellow disc
    Yellow,
}

impl SlotState {
    /// Emoji used when rendering the board
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Empty => "⚫",
            Self::Red => "🔴",
            Self::Yellow => "🟡",
        }
    }
}

/// One cell; `x` is the column, `y` the row counted from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Column index
    pub x: usize,
    /// Row index from the bottom
    pub y: usize,
    /// Disc in the cell
    pub state: SlotState,
}

/// Board state, serialized as JSON in the game row.
///
/// `slots[x][y]` addresses column `x`, row `y` (`y = 0` is the bottom row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Cells by column, then row
    pub slots: Vec<Vec<Slot>>,
    /// Missing on boards stored before the first move
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    /// The four connected discs once someone has won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_slots: Option<Vec<Slot>>,
    /// Discs placed so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_count: Option<u32>,
}

impl Board {
    /// Empty 7x6 board with red to move.
    #[must_use]
    pub fn new() -> Self {
        let slots = (0..COLUMNS)
            .map(|x| {
                (0..ROWS)
                    .map(|y| Slot {
                        x,
                        y,
                        state: SlotState::Empty,
                    })
                    .collect()
            })
            .collect();

        Self {
            slots,
            game_state: Some(GameState::RedTurn),
            winning_slots: None,
            move_count: Some(0),
        }
    }

    /// Current state; a board without one is treated as red to move.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.game_state.unwrap_or(GameState::RedTurn)
    }

    /// State of the slot at column `x`, row `y`, if it exists.
    #[must_use]
    pub fn slot(&self, x: usize, y: usize) -> Option<SlotState> {
        self.slots.get(x).and_then(|column| column.get(y)).map(|s| s.state)
    }

    /// Renders the board as an emoji grid with a column header, top row first.
    #[must_use]
    pub fn render(&self) -> String {
        let winning = self.winning_slots.as_deref().unwrap_or_default();
        let rows = self.slots.iter().map(Vec::len).max().unwrap_or(0);

        let mut out = Column::ALL
            .iter()
            .take(self.slots.len())
            .map(|c| c.emoji())
            .collect::<String>();
        out.push('\n');

        for y in (0..rows).rev() {
            for x in 0..self.slots.len() {
                let state = self.slot(x, y).unwrap_or(SlotState::Empty);
                let is_winning = winning.iter().any(|s| s.x == x && s.y == y);
                out.push_str(if is_winning { "✨" } else { state.emoji() });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Board column, `A` on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Leftmost column
    A,
    /// Second column
    B,
    /// Third column
    C,
    /// Middle column
    D,
    /// Fifth column
    E,
    /// Sixth column
    F,
    /// Rightmost column
    G,
}

impl Column {
    /// All columns, left to right.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Zero-based index
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column letter
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }

    /// Regional indicator emoji for the header row
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::A => "🇦",
            Self::B => "🇧",
            Self::C => "🇨",
            Self::D => "🇩",
            Self::E => "🇪",
            Self::F => "🇫",
            Self::G => "🇬",
        }
    }

    /// Parses a column letter, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.letter().eq_ignore_ascii_case(value.trim()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_new_board_shape() {
        let board = Board::new();
        assert_eq!(board.slots.len(), COLUMNS);
        assert!(board.slots.iter().all(|c| c.len() == ROWS));
        assert_eq!(board.slots[3][2], Slot { x: 3, y: 2, state: SlotState::Empty });
        assert_eq!(board.state(), GameState::RedTurn);
    }

    #[test]
    fn test_board_json_format() {
        let board = Board::new();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["gameState"], "RED_TURN");
        assert_eq!(json["moveCount"], 0);
        assert_eq!(json["slots"][0][0]["state"], "EMPTY");
        assert!(json.get("winningSlots").is_none());

        let parsed: Board = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_board_without_optional_fields() {
        let json = r#"{"slots":[[{"x":0,"y":0,"state":"RED"}]]}"#;
        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.game_state, None);
        assert_eq!(board.state(), GameState::RedTurn);
        assert_eq!(board.slot(0, 0), Some(SlotState::Red));
    }

    #[test]
    fn test_column_parse() {
        assert_eq!(Column::parse("c"), Some(Column::C));
        assert_eq!(Column::parse("G"), Some(Column::G));
        assert_eq!(Column::parse("H"), None);
        assert_eq!(Column::D.index(), 3);
    }

    #[test]
    fn test_render_empty_board() {
        let rendered = Board::new().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[0], "🇦🇧🇨🇩🇪🇫🇬");
        assert_eq!(lines[1], "⚫".repeat(COLUMNS));
    }
}
