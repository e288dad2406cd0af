//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for (row, col) board coordinates
//! - [`Move`] for move requests and [`MoveRecord`] for history entries
//! - FEN field parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields, Placement};
pub use mov::{Move, MoveRecord};
pub use piece::{Piece, PieceId, PieceKind};
pub use square::Square;
