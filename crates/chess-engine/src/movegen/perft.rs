//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Pawns always promote to a queen here, so reference counts only match
//! standard tables for trees without promotions.

use super::all_legal_moves;
use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(state, state.current_player());

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&state.apply_move(m.from, m.to), depth - 1))
        .sum()
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = all_legal_moves(state, state.current_player());
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&state.apply_move(m.from, m.to), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
