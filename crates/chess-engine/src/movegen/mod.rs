//! Move generation.
//!
//! Pseudo-moves come from the per-piece walkers in [`attacks`] plus the two
//! state-dependent extras (en passant and castling). Every pseudo-move is
//! then checked on a scratch board: it is legal only if the mover's own king
//! is not attacked afterwards.

mod attacks;
pub mod perft;

use crate::castling::{CastlePath, CastleSide};
use crate::{Board, GameState};
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use attacks::{for_each_target, is_in_check, is_square_attacked, Reach};

/// Legal destinations for the piece on `from`, in generation order.
///
/// Empty when the square is empty. Ownership is not checked: callers decide
/// whether the piece belongs to the side to move.
pub fn legal_moves(state: &GameState, from: Square) -> Vec<Square> {
    match state.board().get(from) {
        Some(piece) => legal_destinations(state.board(), from, piece, state),
        None => Vec::new(),
    }
}

/// Legal destinations for `piece` standing on `from` of `board`.
///
/// `state` supplies castling rights and the en passant target.
pub fn legal_destinations(
    board: &Board,
    from: Square,
    piece: Piece,
    state: &GameState,
) -> Vec<Square> {
    let mut moves = pseudo_destinations(board, from, piece, state);
    moves.retain(|to| keeps_king_safe(board, from, *to, piece, state.en_passant()));
    moves
}

/// Every legal move of `color`, scanning the board row by row from a8.
pub fn all_legal_moves(state: &GameState, color: Color) -> Vec<Move> {
    let board = state.board();
    board
        .pieces_of(color)
        .flat_map(|(from, piece)| {
            legal_destinations(board, from, piece, state)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Returns true as soon as one legal move of `color` is found.
pub fn has_legal_move(state: &GameState, color: Color) -> bool {
    let board = state.board();
    board.pieces_of(color).any(|(from, piece)| {
        pseudo_destinations(board, from, piece, state)
            .into_iter()
            .any(|to| keeps_king_safe(board, from, to, piece, state.en_passant()))
    })
}

/// Pattern moves before the king-safety filter.
fn pseudo_destinations(
    board: &Board,
    from: Square,
    piece: Piece,
    state: &GameState,
) -> Vec<Square> {
    let mut moves = Vec::with_capacity(32);
    for_each_target(board, from, piece, Reach::Moves, |to| {
        moves.push(to);
        false
    });

    match piece.kind {
        PieceKind::Pawn => {
            if let Some(target) = en_passant_capture(board, from, piece.color, state.en_passant()) {
                moves.push(target);
            }
        }
        PieceKind::King => {
            for side in CastleSide::BOTH {
                if can_castle(board, from, piece.color, side, state) {
                    moves.push(CastlePath::new(piece.color, side).king_to);
                }
            }
        }
        _ => {}
    }

    moves
}

/// The en passant target, if the pawn on `from` may capture onto it.
///
/// The target must be one of the pawn's forward diagonals and an opposing
/// pawn must stand directly behind it.
fn en_passant_capture(
    board: &Board,
    from: Square,
    color: Color,
    target: Option<Square>,
) -> Option<Square> {
    let target = target?;
    let dir = color.pawn_direction();
    let diagonal = [-1, 1]
        .into_iter()
        .any(|d_col| from.offset(dir, d_col) == Some(target));
    if !diagonal || !board.is_empty(target) {
        return None;
    }
    let victim = Square::at(from.row(), target.col());
    board
        .get(victim)
        .filter(|p| p.kind == PieceKind::Pawn && p.color != color)
        .map(|_| target)
}

/// Castling eligibility, evaluated fresh at generation time.
fn can_castle(
    board: &Board,
    from: Square,
    color: Color,
    side: CastleSide,
    state: &GameState,
) -> bool {
    let path = CastlePath::new(color, side);
    if !state.castling().has(color, side) || from != path.king_from {
        return false;
    }
    if color == state.current_player() && state.in_check() {
        return false;
    }

    let rook_home = board
        .get(path.rook_from)
        .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color);
    if !rook_home || !path.between().all(|sq| board.is_empty(sq)) {
        return false;
    }

    let them = color.opposite();
    !path
        .king_walk()
        .iter()
        .any(|sq| is_square_attacked(board, *sq, them))
}

/// Applies the bare relocation to a scratch board and asks whether the
/// mover's king survives it.
fn keeps_king_safe(
    board: &Board,
    from: Square,
    to: Square,
    piece: Piece,
    en_passant: Option<Square>,
) -> bool {
    let mut scratch = *board;
    let is_en_passant = piece.kind == PieceKind::Pawn
        && en_passant == Some(to)
        && from.col() != to.col()
        && scratch.is_empty(to);
    if is_en_passant {
        scratch.take(Square::at(from.row(), to.col()));
    }
    scratch.relocate(from, to);
    !is_in_check(&scratch, piece.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let state = GameState::new();
        assert_eq!(all_legal_moves(&state, Color::White).len(), 20);
        assert_eq!(all_legal_moves(&state, Color::Black).len(), 20);
        assert!(has_legal_move(&state, Color::White));
    }

    #[test]
    fn empty_square_has_no_moves() {
        let state = GameState::new();
        assert!(legal_moves(&state, sq("e4")).is_empty());
    }

    #[test]
    fn knight_moves_from_start() {
        let state = GameState::new();
        assert_eq!(legal_moves(&state, sq("g1")), vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin() {
        // White bishop on e2 pinned by the rook on e8.
        let state = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(legal_moves(&state, sq("e2")).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&state, sq("e1"));
        // d2 is capturable; d1, e2, f2 are covered by the rook.
        assert_eq!(moves, vec![sq("d2"), sq("f1")]);
    }

    #[test]
    fn check_must_be_answered() {
        // Black queen checks along the e-file; only blocks, captures or king moves.
        let state = GameState::from_fen("4k3/4q3/8/8/8/8/3P1N2/3QK3 w - - 0 1").unwrap();
        assert!(state.in_check());
        for mv in all_legal_moves(&state, Color::White) {
            let next = state.apply_move(mv.from, mv.to);
            assert!(!is_in_check(next.board(), Color::White), "{} leaves king in check", mv);
        }
    }

    #[test]
    fn castling_both_sides() {
        let state =
            GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = legal_moves(&state, Square::E1);
        assert!(moves.contains(&Square::G1));
        assert!(moves.contains(&Square::C1));
    }

    #[test]
    fn no_castling_through_attack() {
        let fen = "r3k2r/pppp1ppp/8/4r3/8/8/PPPP1PPP/R3K2R w KQkq - 0 1";
        let state = GameState::from_fen(fen).unwrap();
        // King on e1 is in check from the e5 rook, so neither side is available.
        let moves = legal_moves(&state, Square::E1);
        assert!(!moves.contains(&Square::G1));
        assert!(!moves.contains(&Square::C1));

        let fen = "r3k2r/ppppp1pp/8/5r2/8/8/PPPPP1PP/R3K2R w KQkq - 0 1";
        let state = GameState::from_fen(fen).unwrap();
        let moves = legal_moves(&state, Square::E1);
        assert!(!moves.contains(&Square::G1), "f1 is attacked");
        assert!(moves.contains(&Square::C1));
    }

    #[test]
    fn queenside_ignores_attack_on_b_file() {
        let state = GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(legal_moves(&state, Square::E1).contains(&Square::C1));
    }

    #[test]
    fn no_castling_without_rook() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
        assert!(!legal_moves(&state, Square::E1).contains(&Square::G1));
    }

    #[test]
    fn no_castling_when_blocked() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
        let moves = legal_moves(&state, Square::E1);
        assert!(!moves.contains(&Square::G1));
        assert!(!moves.contains(&Square::C1));
    }

    #[test]
    fn en_passant_capture_offered() {
        let fen = "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1";
        let state = GameState::from_fen(fen).unwrap();
        assert!(legal_moves(&state, sq("f5")).contains(&sq("e6")));
    }

    #[test]
    fn en_passant_blocked_by_rank_pin() {
        // Capturing would expose the white king on a5 to the rook on h5.
        let state = GameState::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1").unwrap();
        assert!(!legal_moves(&state, sq("b5")).contains(&sq("c6")));
    }

    #[test]
    fn pawn_promotion_square_is_listed_once() {
        let state = GameState::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        assert_eq!(legal_moves(&state, sq("a7")), vec![sq("a8")]);
    }
}
