//! Core domain types for the board game.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Cosmetic marker skin chosen by the human.
///
/// Skins only change how the human's marker is drawn. The rules never
/// branch on which skin is in play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Skin {
    /// Red chili pepper.
    #[default]
    Chili,
    /// Taco.
    Taco,
    /// Cactus.
    Cactus,
    /// Bell pepper.
    Pepper,
    /// Avocado half.
    Avocado,
}

impl Skin {
    /// Single-character symbol used by text renderings of the board.
    pub fn symbol(self) -> char {
        match self {
            Skin::Chili => 'C',
            Skin::Taco => 'T',
            Skin::Cactus => 'K',
            Skin::Pepper => 'P',
            Skin::Avocado => 'A',
        }
    }
}

/// One of the two participants in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human player.
    Human,
    /// The computer opponent.
    Opponent,
}

impl Side {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Opponent,
            Side::Opponent => Side::Human,
        }
    }
}

/// Opponent strength, fixed for the lifetime of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Mostly random play.
    Easy,
    /// Usually strategic.
    #[default]
    Medium,
    /// Always takes wins and blocks.
    Hard,
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    Empty,
    /// Occupied by the opponent's marker.
    Opponent,
    /// Occupied by the human's marker in the given skin.
    Player(Skin),
}

impl Cell {
    /// Returns the side occupying this cell, if any.
    pub fn occupant(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Opponent => Some(Side::Opponent),
            Cell::Player(_) => Some(Side::Human),
        }
    }

    /// Returns the cell a side places when it moves.
    pub fn for_side(side: Side, skin: Skin) -> Self {
        match side {
            Side::Human => Cell::Player(skin),
            Side::Opponent => Cell::Opponent,
        }
    }
}

/// 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Creates a board from raw cells in row-major order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Returns a copy of this board with one cell replaced.
    ///
    /// Used to simulate a placement without touching the live board.
    pub fn with(&self, pos: Position, cell: Cell) -> Self {
        let mut next = *self;
        next.set(pos, cell);
        next
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of cells held by a side.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.occupant() == Some(side))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their index so the player knows what to type.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => char::from(b'0' + pos as u8),
                    Cell::Opponent => 'O',
                    Cell::Player(skin) => skin.symbol(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_skin_parses_lowercase() {
        assert_eq!(Skin::from_str("chili"), Ok(Skin::Chili));
        assert_eq!(Skin::Avocado.to_string(), "avocado");
        assert!(Skin::from_str("banana").is_err());
    }

    #[test]
    fn test_difficulty_parses_lowercase() {
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_cell_occupant_ignores_skin() {
        assert_eq!(Cell::Player(Skin::Taco).occupant(), Some(Side::Human));
        assert_eq!(Cell::Player(Skin::Cactus).occupant(), Some(Side::Human));
        assert_eq!(Cell::Opponent.occupant(), Some(Side::Opponent));
        assert_eq!(Cell::Empty.occupant(), None);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with(Position::Center, Cell::Opponent);
        assert!(board.is_empty(Position::Center));
        assert_eq!(next.get(Position::Center), Cell::Opponent);
        assert_eq!(next.empty_positions().len(), 8);
    }

    #[test]
    fn test_display_marks_cells() {
        let board = Board::new()
            .with(Position::TopLeft, Cell::Player(Skin::Chili))
            .with(Position::Center, Cell::Opponent);
        assert_eq!(board.display(), "C|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }
}
