//! Move selection for computer play.
//!
//! A static [`evaluate`] function, a depth-bounded minimax [`Searcher`] with
//! alpha-beta pruning, and the [`Difficulty`] tiers that mix random play with
//! searched play.
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_engine::create_initial_state;
//! use chess_search::{choose_move, Difficulty};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let state = create_initial_state();
//! let mut rng = StdRng::seed_from_u64(42);
//! let mv = choose_move(&state, Color::White, Difficulty::Easy, &mut rng);
//! assert!(mv.is_some());
//! ```

pub mod config;
pub mod difficulty;
pub mod evaluation;
pub mod search;

pub use config::{ConfigError, SearchConfig};
pub use difficulty::{
    choose_move, ComputerPlayer, Difficulty, DifficultyProfile, ParseDifficultyError,
};
pub use evaluation::evaluate;
pub use search::{best_move, minimax, SearchLimits, SearchOutcome, Searcher, INFINITY};
