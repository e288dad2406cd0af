//! Castling rights and castling geometry.

use chess_core::{Color, Square};

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// The side implied by a two-file king shift, if the shift is one.
    pub fn from_king_move(from: Square, to: Square) -> Option<Self> {
        if from.row() != to.row() {
            return None;
        }
        match to.col() as i8 - from.col() as i8 {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    const fn flag(self, color: Color) -> u8 {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => CastlingRights::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => CastlingRights::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => CastlingRights::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => CastlingRights::BLACK_QUEENSIDE,
        }
    }
}

/// Fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlePath {
    pub const fn new(color: Color, side: CastleSide) -> Self {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => CastlePath {
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
            },
            (Color::White, CastleSide::Queenside) => CastlePath {
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
            },
            (Color::Black, CastleSide::Kingside) => CastlePath {
                king_from: Square::E8,
                king_to: Square::G8,
                rook_from: Square::H8,
                rook_to: Square::F8,
            },
            (Color::Black, CastleSide::Queenside) => CastlePath {
                king_from: Square::E8,
                king_to: Square::C8,
                rook_from: Square::A8,
                rook_to: Square::D8,
            },
        }
    }

    /// Squares strictly between king and rook; all must be empty.
    pub fn between(&self) -> impl Iterator<Item = Square> {
        let row = self.king_from.row();
        let (lo, hi) = if self.rook_from.col() < self.king_from.col() {
            (self.rook_from.col() + 1, self.king_from.col())
        } else {
            (self.king_from.col() + 1, self.rook_from.col())
        };
        (lo..hi).map(move |col| Square::at(row, col))
    }

    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub fn king_walk(&self) -> [Square; 3] {
        let row = self.king_from.row();
        let mid = (self.king_from.col() + self.king_to.col()) / 2;
        [self.king_from, Square::at(row, mid), self.king_to]
    }
}

/// Castling rights flags.
///
/// Rights can only ever be removed: there is no operation that grants one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Builds rights from a FEN `[color][kingside, queenside]` table.
    pub fn from_table(table: [[bool; 2]; 2]) -> Self {
        let mut flags = 0;
        for color in Color::ALL {
            for (i, side) in CastleSide::BOTH.iter().enumerate() {
                if table[color.index()][i] {
                    flags |= side.flag(color);
                }
            }
        }
        CastlingRights(flags)
    }

    /// The inverse of [`CastlingRights::from_table`].
    pub fn to_table(self) -> [[bool; 2]; 2] {
        let mut table = [[false; 2]; 2];
        for color in Color::ALL {
            for (i, side) in CastleSide::BOTH.iter().enumerate() {
                table[color.index()][i] = self.has(color, *side);
            }
        }
        table
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & side.flag(color)) != 0
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(color, CastleSide::Kingside)
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(color, CastleSide::Queenside)
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    /// Removes a single right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !side.flag(color);
    }

    /// Removes the right tied to a rook's original corner, if `sq` is one.
    pub fn remove_corner(&mut self, sq: Square) {
        for color in Color::ALL {
            for side in CastleSide::BOTH {
                if CastlePath::new(color, side).rook_from == sq {
                    self.remove(color, side);
                }
            }
        }
    }

    /// True when every right in `self` is also held by `earlier`.
    #[inline]
    pub const fn is_subset_of(self, earlier: CastlingRights) -> bool {
        self.0 & !earlier.0 == 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}
