//! Win detection.

use crate::position::Position;
use crate::types::{Board, Cell, Side};
use tracing::instrument;

/// The 8 winning lines in scan order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first line (in scan order) held entirely by one marker.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    LINES.into_iter().find(|&[a, b, c]| {
        let cell = board.get(a);
        cell != Cell::Empty && cell == board.get(b) && cell == board.get(c)
    })
}

/// Checks if there is a winner on the board.
///
/// Returns the side holding three in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Side> {
    winning_line(board).and_then(|[a, _, _]| board.get(a).occupant())
}
