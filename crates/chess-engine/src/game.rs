//! Game state and the pure apply-move transition.
//!
//! A [`GameState`] is an immutable snapshot: board, side to move, castling
//! rights, en passant target and the append-only move history. The only way
//! to advance a game is [`GameState::apply_move`], which returns a new state
//! and leaves its receiver untouched.

use crate::castling::{CastlePath, CastleSide, CastlingRights};
use crate::movegen::{self, is_in_check};
use crate::rules::{self, GameStatus};
use crate::Board;
use chess_core::{Color, FenError, FenFields, Move, MoveRecord, PieceKind, Square};
use thiserror::Error;
use tracing::trace;

/// A FEN string that parses but cannot describe a playable position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{0} is not to move but its king is in check")]
    OpponentInCheck(Color),
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    status: GameStatus,
    history: Vec<MoveRecord>,
    in_check: bool,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates the standard starting position with White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            current_player: Color::White,
            status: GameStatus::Active,
            history: Vec::new(),
            in_check: false,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Creates a state from a FEN string. History starts out empty.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let fields = FenFields::parse(fen)?;
        let board = Board::from_placement(&fields.placement);

        for color in Color::ALL {
            let count = board.count(PieceKind::King, color);
            if count != 1 {
                return Err(PositionError::KingCount { color, count });
            }
        }

        let current_player = fields.active_color;
        if is_in_check(&board, current_player.opposite()) {
            return Err(PositionError::OpponentInCheck(current_player.opposite()));
        }

        let mut state = GameState {
            board,
            current_player,
            status: GameStatus::Active,
            history: Vec::new(),
            in_check: is_in_check(&board, current_player),
            castling: CastlingRights::from_table(fields.castling),
            en_passant: fields.en_passant,
        };
        state.status = rules::derive_status(&state);
        Ok(state)
    }

    /// Serializes the modelled fields as FEN, with `0 1` clocks.
    pub fn to_fen(&self) -> String {
        FenFields {
            placement: self.board.to_placement(),
            active_color: self.current_player,
            castling: self.castling.to_table(),
            en_passant: self.en_passant,
        }
        .to_fen()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Every applied move, oldest first.
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Legal destinations for the piece on `from`. See [`movegen::legal_moves`].
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        movegen::legal_moves(self, from)
    }

    /// Every legal move of `color`. See [`movegen::all_legal_moves`].
    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        movegen::all_legal_moves(self, color)
    }

    /// Applies a move and returns the resulting state.
    ///
    /// Legality is not re-checked; callers pick `to` from
    /// [`GameState::legal_moves`]. An empty `from` square yields an
    /// unchanged copy of `self`.
    pub fn apply_move(&self, from: Square, to: Square) -> GameState {
        let Some(piece) = self.board.get(from) else {
            return self.clone();
        };
        let mover = piece.color;
        let mut board = self.board;
        let mut captured = board.get(to);

        // A two-file king shift only castles from home with the rook in its corner.
        let castle = match piece.kind {
            PieceKind::King => CastleSide::from_king_move(from, to).filter(|side| {
                let path = CastlePath::new(mover, *side);
                from == path.king_from
                    && board
                        .get(path.rook_from)
                        .is_some_and(|p| p.kind == PieceKind::Rook && p.color == mover)
            }),
            _ => None,
        };
        if let Some(side) = castle {
            let path = CastlePath::new(mover, side);
            board.relocate(path.rook_from, path.rook_to);
        }

        let is_en_passant = piece.kind == PieceKind::Pawn
            && self.en_passant == Some(to)
            && from.col() != to.col()
            && board.is_empty(to);
        if is_en_passant {
            captured = board.take(Square::at(from.row(), to.col()));
        }

        board.relocate(from, to);

        let mut promotion = None;
        if piece.kind == PieceKind::Pawn && to.row() == mover.promotion_row() {
            board.set(to, Some(piece.promoted(PieceKind::Queen)));
            promotion = Some(PieceKind::Queen);
        }

        let next = mover.opposite();
        let in_check = is_in_check(&board, next);

        let mut castling = self.castling;
        match piece.kind {
            PieceKind::King => castling.remove_color(mover),
            PieceKind::Rook => castling.remove_corner(from),
            _ => {}
        }
        castling.remove_corner(to);

        let en_passant = if piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            Some(Square::at((from.row() + to.row()) / 2, from.col()))
        } else {
            None
        };

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(MoveRecord {
            from,
            to,
            piece,
            captured,
            is_check: in_check,
            is_checkmate: false,
            is_castle: castle.is_some(),
            is_en_passant,
            promotion,
        });

        let mut state = GameState {
            board,
            current_player: next,
            status: GameStatus::Active,
            history,
            in_check,
            castling,
            en_passant,
        };

        state.status = rules::derive_status(&state);
        match state.status {
            GameStatus::Checkmate => {
                if let Some(record) = state.history.last_mut() {
                    record.is_checkmate = true;
                }
                trace!(mv = %Move::new(from, to), loser = %next, "checkmate");
            }
            GameStatus::Stalemate => {
                trace!(mv = %Move::new(from, to), "stalemate");
            }
            _ => {}
        }

        state
    }
}

/// The standard starting position with White to move.
pub fn create_initial_state() -> GameState {
    GameState::new()
}

/// Free-function form of [`GameState::apply_move`].
pub fn apply_move(state: &GameState, from: Square, to: Square) -> GameState {
    state.apply_move(from, to)
}
