//! Chess rules engine over an 8x8 array board.
//!
//! This crate provides:
//! - [`Board`] - 64-cell grid of optional pieces, copied per transition
//! - [`GameState`] - immutable game snapshot with the pure apply-move transition
//! - [`movegen`] - legal move generation and attack detection
//! - [`rules`] - game status, checkmate/stalemate detection and the [`RuleSet`] trait
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_engine::{create_initial_state, GameStatus};
//!
//! let state = create_initial_state();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert!(state.legal_moves(e2).contains(&e4));
//!
//! let next = state.apply_move(e2, e4);
//! assert_eq!(next.current_player(), Color::Black);
//! assert_eq!(next.status(), GameStatus::Active);
//! ```

mod board;
pub mod castling;
mod game;
pub mod movegen;
pub mod rules;

pub use board::Board;
pub use castling::{CastleSide, CastlingRights};
pub use game::{apply_move, create_initial_state, GameState, PositionError};
pub use movegen::{all_legal_moves, is_in_check, is_square_attacked, legal_moves};
pub use rules::{is_checkmate, is_stalemate, GameStatus, RuleSet, StandardChess};
