//! Board square representation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when text is not a square name in "a1".."h8".
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid square: '{0}'")]
pub struct SquareParseError(pub String);

/// A square on the board, as a zero-based (row, col) pair.
///
/// Row 0 is rank 1 and column 0 is file a. Internally the square is stored as
/// the index `row * 8 + col`, so a1 = 0, h1 = 7, a2 = 8, ..., h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Returns true if both coordinates lie in `[0, 7]`.
    #[inline]
    pub const fn in_range(row: i8, col: i8) -> bool {
        0 <= row && row < 8 && 0 <= col && col < 8
    }

    /// Creates a square from row and column, or `None` if off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = bytes[0].wrapping_sub(b'a');
        let row = bytes[1].wrapping_sub(b'1');
        Square::new(row, col)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0 = rank 1).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0 = file a).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square reached by stepping `(drow, dcol)`, if still on the board.
    #[inline]
    pub const fn offset(self, drow: i8, dcol: i8) -> Option<Self> {
        let row = self.row() as i8 + drow;
        let col = self.col() as i8 + dcol;
        if Square::in_range(row, col) {
            Some(Square(row as u8 * 8 + col as u8))
        } else {
            None
        }
    }

    /// Returns true if the two squares touch (including diagonally).
    #[inline]
    pub const fn is_adjacent(self, other: Square) -> bool {
        let dr = self.row().abs_diff(other.row());
        let dc = self.col().abs_diff(other.col());
        dr <= 1 && dc <= 1 && (dr | dc) != 0
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let mut s = String::with_capacity(2);
        s.push((b'a' + self.col()) as char);
        s.push((b'1' + self.row()) as char);
        s
    }

    // Common squares
    pub const A1: Square = Square(0);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const H8: Square = Square(63);
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| SquareParseError(s.to_string()))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
