//! Move representation.

use crate::{Piece, PieceKind, Square};
use std::fmt;

/// A move request: a piece travels from one square to another.
///
/// Special handling (castling, en passant, promotion) is inferred from the
/// position when the move is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the UCI notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses a move from UCI notation.
    ///
    /// A trailing promotion letter is accepted and ignored, since pawns
    /// always promote to a queen.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() < 4 || s.len() > 5 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        if s.len() == 5 && !matches!(s.as_bytes()[4], b'q' | b'Q') {
            return None;
        }
        Some(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// A move as recorded in game history, annotated with its consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood on `from` before moving.
    pub piece: Piece,
    /// The piece removed by this move, including a pawn taken en passant.
    pub captured: Option<Piece>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_castle: bool,
    pub is_en_passant: bool,
    /// Kind the moving pawn was promoted to.
    pub promotion: Option<PieceKind>,
}

impl MoveRecord {
    /// The bare (from, to) pair of this record.
    #[inline]
    pub const fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
