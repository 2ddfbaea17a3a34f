//! Draw detection.

use crate::types::{Board, Cell};

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a draw.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| *cell != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Evaluation, evaluate};
    use crate::types::Skin;

    const P: Cell = Cell::Player(Skin::Chili);
    const O: Cell = Cell::Opponent;
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_one_gap_not_full() {
        let board = Board::from_cells([P, O, P, O, P, P, O, P, E]);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // P O P / O P P / O P O
        let board = Board::from_cells([P, O, P, O, P, P, O, P, O]);
        assert!(is_full(&board));
        assert_eq!(evaluate(&board), Evaluation::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_not_draw() {
        // P P P / O O P / P O O
        let board = Board::from_cells([P, P, P, O, O, P, P, O, O]);
        assert!(is_full(&board));
        assert!(matches!(evaluate(&board), Evaluation::Won(_)));
    }
}
