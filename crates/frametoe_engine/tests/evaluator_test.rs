//! Tests for win/draw evaluation.

use frametoe_engine::{Board, Cell, Evaluation, LINES, Side, Skin, evaluate, winning_line};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HUMAN: Cell = Cell::Player(Skin::Chili);

/// Independent line check so the test does not lean on the engine.
fn has_line(cells: &[Cell; 9], cell: Cell) -> bool {
    const ROWS: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];
    ROWS.iter().any(|line| line.iter().all(|&i| cells[i] == cell))
}

#[test]
fn test_every_line_wins_for_either_side() {
    let mut rng = StdRng::seed_from_u64(2024);

    for line in LINES {
        for (marker, other, side) in [
            (HUMAN, Cell::Opponent, Side::Human),
            (Cell::Opponent, HUMAN, Side::Opponent),
        ] {
            // Rest empty.
            let mut board = Board::new();
            for pos in line {
                board = board.with(pos, marker);
            }
            assert_eq!(evaluate(&board), Evaluation::Won(side));
            assert_eq!(winning_line(&board), Some(line));

            // Rest filled at random, as long as the other side has no line.
            for _ in 0..50 {
                let mut cells = [Cell::Empty; 9];
                for cell in cells.iter_mut() {
                    *cell = if rng.random_bool(0.5) { other } else { Cell::Empty };
                }
                for pos in line {
                    cells[pos.to_index()] = marker;
                }
                if has_line(&cells, other) {
                    continue;
                }
                assert_eq!(evaluate(&Board::from_cells(cells)), Evaluation::Won(side));
            }
        }
    }
}

#[test]
fn test_full_boards_without_line_are_draws() {
    let mut draws = 0;
    for mask in 0u16..512 {
        let mut cells = [Cell::Empty; 9];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = if mask & (1 << i) != 0 { HUMAN } else { Cell::Opponent };
        }
        let board = Board::from_cells(cells);
        let lined = has_line(&cells, HUMAN) || has_line(&cells, Cell::Opponent);

        match evaluate(&board) {
            Evaluation::Draw => {
                assert!(!lined, "draw reported with a line: {:?}", cells);
                draws += 1;
            }
            Evaluation::Won(_) => assert!(lined),
            Evaluation::InProgress => panic!("full board reported in progress"),
        }
    }
    assert!(draws > 0);
}

#[test]
fn test_open_boards_without_line_are_in_progress() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut checked = 0;
    while checked < 200 {
        let mut cells = [Cell::Empty; 9];
        for cell in cells.iter_mut() {
            *cell = match rng.random_range(0..3) {
                0 => Cell::Empty,
                1 => HUMAN,
                _ => Cell::Opponent,
            };
        }
        if !cells.contains(&Cell::Empty) || has_line(&cells, HUMAN) || has_line(&cells, Cell::Opponent) {
            continue;
        }
        assert_eq!(evaluate(&Board::from_cells(cells)), Evaluation::InProgress);
        checked += 1;
    }
}

#[test]
fn test_evaluate_is_repeatable() {
    let board = Board::new()
        .with(frametoe_engine::Position::Center, Cell::Opponent)
        .with(frametoe_engine::Position::TopLeft, HUMAN);
    let first = evaluate(&board);
    for _ in 0..10 {
        assert_eq!(evaluate(&board), first);
    }
    assert!(!first.is_terminal());
}
