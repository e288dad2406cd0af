//! Game status, terminal detection and the rule set abstraction.
//!
//! The search engine only talks to the rules through the [`RuleSet`] trait;
//! [`StandardChess`] is the one implementation.

mod standard;

pub use standard::StandardChess;

use crate::movegen::has_legal_move;
use crate::{Board, GameState};
use chess_core::{Color, Move, Square};

/// Status of a game after the latest transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Play continues and the side to move is not in check.
    Active,
    /// The side to move is in check but has a legal reply.
    Check,
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
    /// Reserved for draw rules this engine does not detect; never produced.
    Draw,
}

impl GameStatus {
    /// True for statuses that end the game.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw)
    }
}

/// True iff the side to move is in check and has no legal move.
pub fn is_checkmate(state: &GameState) -> bool {
    state.in_check() && !has_legal_move(state, state.current_player())
}

/// True iff the side to move is not in check and has no legal move.
pub fn is_stalemate(state: &GameState) -> bool {
    !state.in_check() && !has_legal_move(state, state.current_player())
}

/// Status of `state` derived from its check flag and move availability.
pub(crate) fn derive_status(state: &GameState) -> GameStatus {
    match (state.in_check(), has_legal_move(state, state.current_player())) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Active,
    }
}

/// Trait over the rules the search engine plays by.
///
/// # Example
///
/// ```
/// use chess_engine::rules::RuleSet;
/// use chess_engine::StandardChess;
/// use chess_core::Color;
///
/// let state = StandardChess.initial_state();
/// let moves = StandardChess.all_legal_moves(&state, Color::White);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the starting state.
    fn initial_state(&self) -> GameState;

    /// Legal destinations of the piece on `from`.
    fn legal_moves(&self, state: &GameState, from: Square) -> Vec<Square>;

    /// Every legal move of `color`, in board scan order.
    fn all_legal_moves(&self, state: &GameState, color: Color) -> Vec<Move>;

    /// Applies a move, returning the new state.
    fn apply_move(&self, state: &GameState, mv: Move) -> GameState;

    /// Returns true if the king of `color` is attacked on `board`.
    fn is_check(&self, board: &Board, color: Color) -> bool;

    fn is_checkmate(&self, state: &GameState) -> bool;

    fn is_stalemate(&self, state: &GameState) -> bool;

    /// Returns true if `mv` is legal for the side to move.
    fn is_legal(&self, state: &GameState, mv: Move) -> bool {
        state
            .board()
            .get(mv.from)
            .is_some_and(|p| p.color == state.current_player())
            && self.legal_moves(state, mv.from).contains(&mv.to)
    }

    /// Applies `mv` if it is legal, otherwise returns `None`.
    fn try_apply_move(&self, state: &GameState, mv: Move) -> Option<GameState> {
        if self.is_legal(state, mv) {
            Some(self.apply_move(state, mv))
        } else {
            None
        }
    }
}
