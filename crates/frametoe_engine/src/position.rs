//! Cell addresses.

use serde::{Deserialize, Serialize};

/// A cell on the 3x3 board, numbered 0-8 in row-major order.
///
/// Displays and parses as kebab-case (`top-left`, `center`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Position {
    /// Index 0.
    TopLeft = 0,
    /// Index 1.
    TopCenter = 1,
    /// Index 2.
    TopRight = 2,
    /// Index 3.
    MiddleLeft = 3,
    /// Index 4.
    Center = 4,
    /// Index 5.
    MiddleRight = 5,
    /// Index 6.
    BottomLeft = 6,
    /// Index 7.
    BottomCenter = 7,
    /// Index 8.
    BottomRight = 8,
}

impl Position {
    /// Every cell, in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// The four corners, preferred by the opponent after the center.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Board index, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Cell at `index`, or `None` past 8.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column, 0 at the left.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// True for the four corner cells.
    pub fn is_corner(self) -> bool {
        self.row() != 1 && self.col() != 1
    }

    /// Reads a cell from user input: an index or a name, case-insensitive.
    pub fn parse_cell(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => input.parse().ok(),
        }
    }
}
