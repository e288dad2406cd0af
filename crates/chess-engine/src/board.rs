//! 8x8 board of optional pieces.

use chess_core::{Color, Piece, PieceId, PieceKind, Placement, Square};
use std::fmt;

/// A 64-cell mapping from [`Square`] to an optional [`Piece`].
///
/// Boards are plain `Copy` values: every transition produces a fresh board
/// and no two game states ever share one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates the standard starting arrangement.
    ///
    /// Identities are assigned in row-major order from a8, so black pieces
    /// get ids 0-15 and white pieces 16-31.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        let mut next_id = 0u8;
        let mut place = |board: &mut Board, sq: Square, kind: PieceKind, color: Color| {
            board.set(sq, Some(Piece::new(kind, color, PieceId(next_id))));
            next_id += 1;
        };

        for (col, kind) in PieceKind::BACK_ROW.iter().enumerate() {
            place(&mut board, Square::at(0, col as u8), *kind, Color::Black);
        }
        for col in 0..8 {
            place(&mut board, Square::at(1, col), PieceKind::Pawn, Color::Black);
        }
        for col in 0..8 {
            place(&mut board, Square::at(6, col), PieceKind::Pawn, Color::White);
        }
        for (col, kind) in PieceKind::BACK_ROW.iter().enumerate() {
            place(&mut board, Square::at(7, col as u8), *kind, Color::White);
        }

        board
    }

    /// Builds a board from a parsed FEN placement grid.
    pub fn from_placement(placement: &Placement) -> Self {
        let mut board = Board::empty();
        let mut next_id = 0u8;
        for sq in Square::all() {
            if let Some((kind, color)) = placement[sq.row() as usize][sq.col() as usize] {
                board.set(sq, Some(Piece::new(kind, color, PieceId(next_id))));
                next_id += 1;
            }
        }
        board
    }

    /// The inverse of [`Board::from_placement`], dropping identities.
    pub fn to_placement(&self) -> Placement {
        let mut grid: Placement = [[None; 8]; 8];
        for (sq, piece) in self.pieces() {
            grid[sq.row() as usize][sq.col() as usize] = Some((piece.kind, piece.color));
        }
        grid
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index() as usize] = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Moves whatever stands on `from` to `to`, overwriting `to`.
    #[inline]
    pub fn relocate(&mut self, from: Square, to: Square) {
        let piece = self.take(from);
        self.set(to, piece);
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates the squares holding pieces of `color`, in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Locates the king of the given color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// Number of pieces of the given kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces()
            .filter(|(_, p)| p.kind == kind && p.color == color)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self
                    .get(Square::at(row, col))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{}", c)?;
                if col < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
