//! Per-piece target walking and attack detection.
//!
//! [`for_each_target`] is the single source of piece movement patterns. It
//! is driven in [`Reach::Moves`] mode by the move generator and in
//! [`Reach::Attacks`] mode by [`is_square_attacked`]. Attack mode never
//! includes castling, en passant or pawn pushes, so castling safety can be
//! asked of it without recursion.

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Which subset of a piece's movement to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Ordinary moves: pawn pushes and pawn captures onto opposing pieces.
    Moves,
    /// Capture-capable reach: pawns cover both forward diagonals, occupied
    /// or not, and never push.
    Attacks,
}

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Calls `visit` for every square `piece` standing on `from` can reach.
///
/// `visit` returns `true` to stop the walk early; the function then returns
/// `true` as well. Targets come out in a fixed order per piece kind.
pub fn for_each_target<F>(
    board: &Board,
    from: Square,
    piece: Piece,
    reach: Reach,
    mut visit: F,
) -> bool
where
    F: FnMut(Square) -> bool,
{
    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, piece.color, reach, &mut visit),
        PieceKind::Knight => step_targets(board, from, piece.color, &KNIGHT_OFFSETS, &mut visit),
        PieceKind::King => step_targets(board, from, piece.color, &KING_OFFSETS, &mut visit),
        PieceKind::Rook => ray_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut visit),
        PieceKind::Bishop => ray_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut visit),
        PieceKind::Queen => {
            ray_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut visit)
                || ray_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut visit)
        }
    }
}

fn pawn_targets<F>(board: &Board, from: Square, color: Color, reach: Reach, visit: &mut F) -> bool
where
    F: FnMut(Square) -> bool,
{
    let dir = color.pawn_direction();

    if reach == Reach::Moves {
        if let Some(one) = from.offset(dir, 0).filter(|sq| board.is_empty(*sq)) {
            if visit(one) {
                return true;
            }
            if from.row() == color.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0).filter(|sq| board.is_empty(*sq)) {
                    if visit(two) {
                        return true;
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(target) = from.offset(dir, d_col) else {
            continue;
        };
        let hit = match reach {
            Reach::Attacks => true,
            Reach::Moves => board.get(target).is_some_and(|p| p.color != color),
        };
        if hit && visit(target) {
            return true;
        }
    }

    false
}

fn step_targets<F>(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    visit: &mut F,
) -> bool
where
    F: FnMut(Square) -> bool,
{
    for &(d_row, d_col) in offsets {
        let Some(target) = from.offset(d_row, d_col) else {
            continue;
        };
        let open = board.get(target).map_or(true, |p| p.color != color);
        if open && visit(target) {
            return true;
        }
    }
    false
}

fn ray_targets<F>(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    visit: &mut F,
) -> bool
where
    F: FnMut(Square) -> bool,
{
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.get(next) {
                None => {
                    if visit(next) {
                        return true;
                    }
                }
                Some(blocker) => {
                    if blocker.color != color && visit(next) {
                        return true;
                    }
                    break;
                }
            }
            current = next;
        }
    }
    false
}

/// Returns true if any piece of `by_color` reaches `sq` with a
/// capture-capable move.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| for_each_target(board, from, piece, Reach::Attacks, |t| t == sq))
}

/// Returns true if the king of the given color is attacked.
///
/// A board without that king is structurally impossible in play; debug
/// builds assert on it and release builds report "not attacked".
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = board.king_square(color);
    debug_assert!(king.is_some(), "no {} king on the board", color);
    king.is_some_and(|sq| is_square_attacked(board, sq, color.opposite()))
}
