//! Tests for the opponent move selector.
//!
//! Difficulty tiers are random, so these check properties over many
//! seeded runs rather than exact move sequences.

use frametoe_engine::{
    Board, Cell, Difficulty, Position, Side, Skin, check_winner, select_move,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

const SKIN: Skin = Skin::Chili;
const P: Cell = Cell::Player(SKIN);
const O: Cell = Cell::Opponent;
const E: Cell = Cell::Empty;

fn winning_cells(board: &Board, cell: Cell, side: Side) -> Vec<Position> {
    board
        .empty_positions()
        .into_iter()
        .filter(|pos| check_winner(&board.with(*pos, cell)) == Some(side))
        .collect()
}

/// Random boards reachable in play with the opponent to move.
fn opponent_turn_boards(rng: &mut StdRng, count: usize) -> Vec<Board> {
    let mut boards = Vec::new();
    while boards.len() < count {
        let mut board = Board::new();
        let mut side = Side::Opponent;
        loop {
            let empty = board.empty_positions();
            let Some(pos) = empty.choose(rng).copied() else {
                break;
            };
            board = board.with(pos, Cell::for_side(side, SKIN));
            side = side.other();
            if check_winner(&board).is_some() {
                break;
            }
            if side == Side::Opponent && !board.empty_positions().is_empty() {
                boards.push(board);
            }
        }
    }
    boards
}

fn frequency(board: &Board, difficulty: Difficulty, target: Position, trials: usize) -> f64 {
    let mut rng = StdRng::seed_from_u64(0xF00D);
    let hits = (0..trials)
        .filter(|_| select_move(board, difficulty, SKIN, &mut rng).unwrap() == target)
        .count();
    hits as f64 / trials as f64
}

#[test]
fn test_hard_never_misses_win_or_block() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut wins_seen = 0;
    let mut blocks_seen = 0;

    for board in opponent_turn_boards(&mut rng, 2000) {
        let wins = winning_cells(&board, O, Side::Opponent);
        let blocks = winning_cells(&board, P, Side::Human);
        let choice = select_move(&board, Difficulty::Hard, SKIN, &mut rng).unwrap();

        if !wins.is_empty() {
            assert!(wins.contains(&choice), "missed win on {}", board.display());
            wins_seen += 1;
        } else if !blocks.is_empty() {
            assert!(blocks.contains(&choice), "missed block on {}", board.display());
            blocks_seen += 1;
        }
    }

    assert!(wins_seen > 0 && blocks_seen > 0);
}

#[test]
fn test_selection_is_always_an_empty_cell() {
    let mut rng = StdRng::seed_from_u64(8);
    for board in opponent_turn_boards(&mut rng, 500) {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let choice = select_move(&board, difficulty, SKIN, &mut rng).unwrap();
            assert!(board.is_empty(choice));
        }
    }
}

#[test]
fn test_win_frequency_by_tier() {
    // O O . / . P . / . . P : opponent wins at 2, nothing to block.
    let board = Board::from_cells([O, O, E, E, P, E, E, E, P]);

    assert_eq!(frequency(&board, Difficulty::Hard, Position::TopRight, 500), 1.0);

    // 0.3 strategic, else 1 in 5 empty cells at random.
    let easy = frequency(&board, Difficulty::Easy, Position::TopRight, 4000);
    assert!((0.35..0.53).contains(&easy), "easy took the win {easy}");

    // 0.7 strategic, else 1 in 5.
    let medium = frequency(&board, Difficulty::Medium, Position::TopRight, 4000);
    assert!((0.68..0.84).contains(&medium), "medium took the win {medium}");
}

#[test]
fn test_center_frequency_by_tier() {
    // O . . / . . . / . . P : nothing strategic, center open.
    let board = Board::from_cells([O, E, E, E, E, E, E, E, P]);

    assert_eq!(frequency(&board, Difficulty::Hard, Position::Center, 500), 1.0);

    // Independent 0.3 center gate, else 1 in 7 empty cells.
    let easy = frequency(&board, Difficulty::Easy, Position::Center, 4000);
    assert!((0.33..0.47).contains(&easy), "easy took the center {easy}");

    let medium = frequency(&board, Difficulty::Medium, Position::Center, 4000);
    assert!((0.68..0.81).contains(&medium), "medium took the center {medium}");
}

#[test]
fn test_hard_prefers_open_corners_when_center_taken() {
    let board = Board::from_cells([P, E, E, E, O, E, E, E, E]);
    let mut rng = StdRng::seed_from_u64(77);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..300 {
        let choice = select_move(&board, Difficulty::Hard, SKIN, &mut rng).unwrap();
        assert!(
            [Position::TopRight, Position::BottomLeft, Position::BottomRight].contains(&choice),
            "unexpected {choice}"
        );
        seen.insert(choice);
    }
    assert_eq!(seen.len(), 3, "corners should be chosen uniformly");
}

#[test]
fn test_skin_does_not_change_strategy() {
    let base = [P, P, E, E, O, E, E, E, E];
    for skin in [Skin::Taco, Skin::Cactus, Skin::Avocado] {
        let cells = base.map(|cell| if cell == P { Cell::Player(skin) } else { cell });
        let board = Board::from_cells(cells);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_move(&board, Difficulty::Hard, skin, &mut rng).unwrap(),
            Position::TopRight
        );
    }
}
