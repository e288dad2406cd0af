//! Chess piece representation.

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Back-row layout from the a-file to the h-file.
    pub const BACK_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Returns the FEN character for this kind with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// Stable identity of a physical piece.
///
/// Survives moves and promotion; rules logic never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub id: PieceId,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, id: PieceId) -> Self {
        Piece { kind, color, id }
    }

    /// The same physical piece with a different kind, used for promotion.
    #[inline]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Piece { kind, ..self }
    }

    #[inline]
    pub const fn to_fen_char(self) -> char {
        self.kind.to_fen_char(self.color)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_to_fen() {
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(PieceKind::King.to_fen_char(Color::White), 'K');
        assert_eq!(PieceKind::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn kind_from_fen() {
        assert_eq!(
            PieceKind::from_fen_char('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_fen_char('p'),
            Some((PieceKind::Pawn, Color::Black))
        );
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }

    #[test]
    fn promotion_keeps_identity() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White, PieceId(12));
        let queen = pawn.promoted(PieceKind::Queen);
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert_eq!(queen.id, pawn.id);
        assert_eq!(queen.to_fen_char(), 'Q');
    }

    #[test]
    fn display() {
        let knight = Piece::new(PieceKind::Knight, Color::Black, PieceId(1));
        assert_eq!(knight.to_string(), "Black Knight");
    }
}
