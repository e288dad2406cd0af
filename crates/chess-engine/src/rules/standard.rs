//! Standard chess rules implementation.

use super::{is_checkmate, is_stalemate, RuleSet};
use crate::movegen::{all_legal_moves, is_in_check, legal_moves};
use crate::{Board, GameState};
use chess_core::{Color, Move, Square};

/// Standard chess rules.
///
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion, always to a queen
/// - Check, checkmate, and stalemate detection
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_state(&self) -> GameState {
        GameState::new()
    }

    fn legal_moves(&self, state: &GameState, from: Square) -> Vec<Square> {
        legal_moves(state, from)
    }

    fn all_legal_moves(&self, state: &GameState, color: Color) -> Vec<Move> {
        all_legal_moves(state, color)
    }

    fn apply_move(&self, state: &GameState, mv: Move) -> GameState {
        state.apply_move(mv.from, mv.to)
    }

    fn is_check(&self, board: &Board, color: Color) -> bool {
        is_in_check(board, color)
    }

    fn is_checkmate(&self, state: &GameState) -> bool {
        is_checkmate(state)
    }

    fn is_stalemate(&self, state: &GameState) -> bool {
        is_stalemate(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenFields;

    #[test]
    fn initial_state() {
        let state = StandardChess.initial_state();
        assert_eq!(state.to_fen(), FenFields::STARTPOS);
    }

    #[test]
    fn legality_checks_side_to_move() {
        let state = StandardChess.initial_state();
        let white = Move::from_uci("e2e4").unwrap();
        let black = Move::from_uci("e7e5").unwrap();
        assert!(StandardChess.is_legal(&state, white));
        assert!(!StandardChess.is_legal(&state, black));
        assert!(StandardChess.try_apply_move(&state, black).is_none());

        let next = StandardChess.try_apply_move(&state, white).unwrap();
        assert_eq!(next.current_player(), Color::Black);
    }

    #[test]
    fn illegal_destination_is_rejected() {
        let state = StandardChess.initial_state();
        let mv = Move::from_uci("e2e5").unwrap();
        assert!(!StandardChess.is_legal(&state, mv));
    }

    #[test]
    fn check_query() {
        let state = StandardChess.initial_state();
        assert!(!StandardChess.is_check(state.board(), Color::White));
        assert!(!StandardChess.is_checkmate(&state));
        assert!(!StandardChess.is_stalemate(&state));
    }
}
