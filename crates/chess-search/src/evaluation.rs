//! Static evaluation of a position.
//!
//! Material plus a small positional term per piece, summed from the point of
//! view of one color. Terminal and check states add fixed bonuses.

use chess_core::{Color, Piece, PieceKind, Square};
use chess_engine::{GameState, GameStatus};

/// Piece values in centipawns.
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 300;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 10_000;

/// Added for the winner of a checkmate, subtracted for the loser.
pub const CHECKMATE_SCORE: i32 = 100_000;

/// Penalty for the side in check.
pub const CHECK_PENALTY: i32 = 50;

/// Positional tables, indexed `[row][col]` with the row mirrored per color.
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

/// Base value of a piece kind.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Positional bonus of `piece` standing on `sq`.
///
/// The table row is `7 - row` for white and `row` for black, so rows 0 and 1
/// of the mirrored index are the piece's own two home ranks.
pub fn positional_value(piece: Piece, sq: Square) -> i32 {
    let row = match piece.color {
        Color::White => 7 - sq.row() as usize,
        Color::Black => sq.row() as usize,
    };
    let col = sq.col() as usize;
    let home = row < 2;

    match piece.kind {
        PieceKind::Pawn => PAWN_TABLE[row][col],
        PieceKind::Knight => KNIGHT_TABLE[row][col],
        PieceKind::Bishop => BISHOP_TABLE[row][col],
        PieceKind::Rook => {
            if home {
                -5
            } else {
                0
            }
        }
        PieceKind::Queen => 0,
        PieceKind::King => {
            if home {
                20
            } else {
                -30
            }
        }
    }
}

/// Evaluates `state` from `perspective`'s point of view.
///
/// Higher is better for `perspective`.
pub fn evaluate(state: &GameState, perspective: Color) -> i32 {
    let mut score: i32 = state
        .board()
        .pieces()
        .map(|(sq, piece)| {
            let value = piece_value(piece.kind) + positional_value(piece, sq);
            if piece.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum();

    // The side to move is the one that got mated.
    if state.status() == GameStatus::Checkmate {
        if state.current_player() != perspective {
            score += CHECKMATE_SCORE;
        } else {
            score -= CHECKMATE_SCORE;
        }
    }

    if state.in_check() {
        if state.current_player() == perspective {
            score -= CHECK_PENALTY;
        } else {
            score += CHECK_PENALTY;
        }
    }

    score
}
