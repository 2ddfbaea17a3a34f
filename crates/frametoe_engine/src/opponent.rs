//! Opponent move selection.
//!
//! Every tier shares one strategic step: take an immediate win, otherwise
//! block an immediate human win. Tiers differ in how often they consult
//! it and what they prefer when it finds nothing.
//!
//! The Easy and Medium gates are independent sequential draws rather than
//! one weighted choice. Easy can skip the strategic step and still land
//! on the center check.

use crate::action::EngineMisuseError;
use crate::position::Position;
use crate::rules::LINES;
use crate::types::{Board, Cell, Difficulty, Skin};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Chance that Easy consults the strategic step.
pub const EASY_STRATEGIC_CHANCE: f64 = 0.3;

/// Chance that Easy takes an empty center after skipping or missing strategy.
pub const EASY_CENTER_CHANCE: f64 = 0.3;

/// Chance that Medium plays its full preference order.
pub const MEDIUM_STRATEGIC_CHANCE: f64 = 0.7;

/// Returns true if `board` has a line made entirely of `cell`.
fn holds_line(board: &Board, cell: Cell) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == cell))
}

/// First empty position (index order) where placing `cell` completes a line.
fn completing_move(board: &Board, cell: Cell) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|pos| holds_line(&board.with(*pos, cell), cell))
}

/// Winning move for the opponent, else a block of the human's winning move.
#[instrument(skip(board))]
pub fn strategic_move(board: &Board, skin: Skin) -> Option<Position> {
    if let Some(pos) = completing_move(board, Cell::Opponent) {
        debug!(position = %pos, "Found winning move");
        return Some(pos);
    }
    if let Some(pos) = completing_move(board, Cell::Player(skin)) {
        debug!(position = %pos, "Found blocking move");
        return Some(pos);
    }
    None
}

/// Uniformly random empty position.
pub fn random_move<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<Position, EngineMisuseError> {
    board
        .empty_positions()
        .choose(rng)
        .copied()
        .ok_or(EngineMisuseError::BoardFull)
}

/// The opponent's opening placement: any empty cell, uniformly.
#[instrument(skip(board, rng))]
pub fn opening_move<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<Position, EngineMisuseError> {
    random_move(board, rng)
}

/// Center if free, else a random free corner.
fn positional_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }
    let corners: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    corners.choose(rng).copied()
}

/// Strategic step, then center, then a corner.
fn preferred_move<R: Rng + ?Sized>(board: &Board, skin: Skin, rng: &mut R) -> Option<Position> {
    strategic_move(board, skin).or_else(|| positional_move(board, rng))
}

fn easy_move<R: Rng + ?Sized>(board: &Board, skin: Skin, rng: &mut R) -> Option<Position> {
    if rng.random::<f64>() < EASY_STRATEGIC_CHANCE
        && let Some(pos) = strategic_move(board, skin)
    {
        return Some(pos);
    }
    if rng.random::<f64>() < EASY_CENTER_CHANCE && board.is_empty(Position::Center) {
        return Some(Position::Center);
    }
    None
}

fn medium_move<R: Rng + ?Sized>(board: &Board, skin: Skin, rng: &mut R) -> Option<Position> {
    if rng.random::<f64>() < MEDIUM_STRATEGIC_CHANCE {
        preferred_move(board, skin, rng)
    } else {
        None
    }
}

/// Picks the opponent's next cell.
///
/// `skin` is the human's marker, used to simulate human placements when
/// looking for blocks.
///
/// # Errors
///
/// Returns [`EngineMisuseError::BoardFull`] if no cell is empty.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    skin: Skin,
    rng: &mut R,
) -> Result<Position, EngineMisuseError> {
    if board.empty_positions().is_empty() {
        return Err(EngineMisuseError::BoardFull);
    }

    let chosen = match difficulty {
        Difficulty::Easy => easy_move(board, skin, rng),
        Difficulty::Medium => medium_move(board, skin, rng),
        Difficulty::Hard => preferred_move(board, skin, rng),
    };

    let position = match chosen {
        Some(pos) => pos,
        None => random_move(board, rng)?,
    };
    debug!(position = %position, "Opponent selected move");
    Ok(position)
}
