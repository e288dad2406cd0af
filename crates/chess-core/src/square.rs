//! Board square representation.

use std::fmt;

/// A square on the chess board, addressed by (row, col).
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank
/// (rank 1). Col 0 is the a-file. Internally packed as `row * 8 + col`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column.
    ///
    /// # Panics
    /// Panics if either coordinate is outside 0-7.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square coordinates out of range");
        Square(row * 8 + col)
    }

    /// Creates a square from signed coordinates, `None` when off the board.
    #[inline]
    pub const fn try_new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square((row * 8 + col) as u8))
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
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square::at(b'8' - rank, file - b'a'))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// The square shifted by the given deltas, `None` when off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::try_new(self.row() as i8 + d_row, self.col() as i8 + d_col)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        format!("{}{}", file, rank)
    }

    /// Iterates all 64 squares in row-major order, starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    // Castling squares
    pub const A1: Square = Square::at(7, 0);
    pub const C1: Square = Square::at(7, 2);
    pub const D1: Square = Square::at(7, 3);
    pub const E1: Square = Square::at(7, 4);
    pub const F1: Square = Square::at(7, 5);
    pub const G1: Square = Square::at(7, 6);
    pub const H1: Square = Square::at(7, 7);
    pub const A8: Square = Square::at(0, 0);
    pub const C8: Square = Square::at(0, 2);
    pub const D8: Square = Square::at(0, 3);
    pub const E8: Square = Square::at(0, 4);
    pub const F8: Square = Square::at(0, 5);
    pub const G8: Square = Square::at(0, 6);
    pub const H8: Square = Square::at(0, 7);
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
