//! Plays one game between two difficulty tiers.

use chess_core::{Color, Move};
use chess_engine::{GameState, GameStatus};
use chess_search::{ComputerPlayer, Difficulty};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    /// Stopped after the configured number of plies.
    PlyLimit,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "{} wins by checkmate", winner),
            GameOutcome::Stalemate => f.write_str("draw by stalemate"),
            GameOutcome::PlyLimit => f.write_str("unfinished (ply limit)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
    pub final_state: GameState,
}

/// Drives both sides with one [`ComputerPlayer`].
pub struct SelfPlay<R> {
    player: ComputerPlayer<R>,
    white: Difficulty,
    black: Difficulty,
    max_plies: u32,
}

impl<R: Rng> SelfPlay<R> {
    pub fn new(
        player: ComputerPlayer<R>,
        white: Difficulty,
        black: Difficulty,
        max_plies: u32,
    ) -> Self {
        Self {
            player,
            white,
            black,
            max_plies,
        }
    }

    fn difficulty(&self, color: Color) -> Difficulty {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn play(&mut self, start: GameState) -> GameRecord {
        let mut state = start;
        let mut moves = Vec::new();

        let outcome = loop {
            if state.status().is_terminal() {
                break match state.status() {
                    GameStatus::Checkmate => GameOutcome::Checkmate {
                        winner: state.current_player().opposite(),
                    },
                    _ => GameOutcome::Stalemate,
                };
            }
            if moves.len() as u32 >= self.max_plies {
                break GameOutcome::PlyLimit;
            }

            let color = state.current_player();
            let difficulty = self.difficulty(color);
            // No move outside checkmate means the side is stalemated.
            let Some(mv) = self.player.choose_move(&state, color, difficulty) else {
                break GameOutcome::Stalemate;
            };

            state = state.apply_move(mv.from, mv.to);
            moves.push(mv);
            debug!(
                ply = moves.len(),
                %color,
                %difficulty,
                mv = %mv,
                status = ?state.status(),
                "move played"
            );
        };

        GameRecord {
            moves,
            outcome,
            final_state: state,
        }
    }
}
