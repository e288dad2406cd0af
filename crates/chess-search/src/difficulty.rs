//! Difficulty tiers and the move-selection policy built on them.

use crate::config::{ConfigError, SearchConfig};
use crate::search::{SearchLimits, SearchOutcome, Searcher};
use chess_core::{Color, Move};
use chess_engine::rules::RuleSet;
use chess_engine::{GameState, StandardChess};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Strength of the computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// How one difficulty tier picks its moves.
///
/// With probability `random_move_probability` a uniformly random legal move
/// is played. Otherwise the best move is searched at a depth drawn uniformly
/// from `depths`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub random_move_probability: f64,
    pub depths: Vec<u8>,
}

impl DifficultyProfile {
    pub fn easy() -> Self {
        Self {
            random_move_probability: 0.7,
            depths: vec![2],
        }
    }

    pub fn medium() -> Self {
        Self {
            random_move_probability: 0.1,
            depths: vec![3],
        }
    }

    pub fn hard() -> Self {
        Self {
            random_move_probability: 0.0,
            depths: vec![4, 5],
        }
    }

    /// Built-in profile for `difficulty`.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Medium => Self::medium(),
            Difficulty::Hard => Self::hard(),
        }
    }

    /// Checks the probability range and the depth list.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, tagged with `tier`.
    pub fn validate(&self, tier: Difficulty) -> Result<(), ConfigError> {
        let p = self.random_move_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability { tier, value: p });
        }
        if self.depths.is_empty() {
            return Err(ConfigError::EmptyDepths(tier));
        }
        if self.depths.contains(&0) {
            return Err(ConfigError::ZeroDepth(tier));
        }
        Ok(())
    }

    /// Rolls the random-move branch.
    fn plays_random<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.random_move_probability > 0.0 && rng.gen::<f64>() < self.random_move_probability
    }

    /// Draws a search depth; an empty list searches one ply.
    fn pick_depth<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        self.depths.choose(rng).copied().unwrap_or(1)
    }
}

/// `limits` with the configured time budget as deadline, unless one is set.
fn search_limits(config: &SearchConfig, limits: &SearchLimits) -> SearchLimits {
    let mut limits = limits.clone();
    if limits.deadline.is_none() {
        limits.deadline = config.max_time().map(|budget| Instant::now() + budget);
    }
    limits
}

/// Move selection shared by [`choose_move`] and [`ComputerPlayer`].
fn select_move<S, R>(
    rules: &S,
    config: &SearchConfig,
    limits: &SearchLimits,
    state: &GameState,
    color: Color,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move>
where
    S: RuleSet + Clone + Send + Sync,
    R: Rng + ?Sized,
{
    if state.current_player() != color {
        debug!(%color, to_move = %state.current_player(), "not this side's turn");
        return None;
    }

    let moves = rules.all_legal_moves(state, color);
    if moves.is_empty() {
        return None;
    }

    let profile = config.profile(difficulty);
    if profile.plays_random(rng) {
        let mv = moves.choose(rng).copied();
        debug!(%difficulty, mv = ?mv, "random move");
        return mv;
    }

    let depth = profile.pick_depth(rng);
    Searcher::with_rules(rules.clone(), search_limits(config, limits))
        .parallel(config.parallel_root)
        .best_move(state, color, depth)
        .map(|outcome| outcome.mv)
}

/// Picks a move for `color` at `difficulty` with the built-in profiles.
///
/// Returns `None` when it is not `color`'s turn or `color` has no legal move.
pub fn choose_move<R: Rng + ?Sized>(
    state: &GameState,
    color: Color,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    select_move(
        &StandardChess,
        &SearchConfig::default(),
        &SearchLimits::none(),
        state,
        color,
        difficulty,
        rng,
    )
}

/// A computer opponent: configuration, limits and its own random source.
#[derive(Debug)]
pub struct ComputerPlayer<R, S = StandardChess> {
    config: SearchConfig,
    limits: SearchLimits,
    rules: S,
    rng: R,
}

impl<R: Rng> ComputerPlayer<R> {
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self::with_rules(config, StandardChess, rng)
    }
}

impl<R, S> ComputerPlayer<R, S>
where
    R: Rng,
    S: RuleSet + Clone + Send + Sync,
{
    pub fn with_rules(config: SearchConfig, rules: S, rng: R) -> Self {
        Self {
            config,
            limits: SearchLimits::none(),
            rules,
            rng,
        }
    }

    /// Limits applied to every search this player starts.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Picks a move for `color`; see [`choose_move`].
    pub fn choose_move(
        &mut self,
        state: &GameState,
        color: Color,
        difficulty: Difficulty,
    ) -> Option<Move> {
        select_move(
            &self.rules,
            &self.config,
            &self.limits,
            state,
            color,
            difficulty,
            &mut self.rng,
        )
    }

    /// Full search at a fixed depth, bypassing the random branch.
    pub fn search(&self, state: &GameState, color: Color, depth: u8) -> Option<SearchOutcome> {
        Searcher::with_rules(self.rules.clone(), search_limits(&self.config, &self.limits))
            .parallel(self.config.parallel_root)
            .best_move(state, color, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::create_initial_state;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn parses_names() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn default_profiles() {
        assert_eq!(DifficultyProfile::easy().random_move_probability, 0.7);
        assert_eq!(DifficultyProfile::easy().depths, vec![2]);
        assert_eq!(DifficultyProfile::medium().random_move_probability, 0.1);
        assert_eq!(DifficultyProfile::medium().depths, vec![3]);
        assert_eq!(DifficultyProfile::hard().random_move_probability, 0.0);
        assert_eq!(DifficultyProfile::hard().depths, vec![4, 5]);
        for d in Difficulty::ALL {
            assert!(DifficultyProfile::for_difficulty(d).validate(d).is_ok());
        }
    }

    #[test]
    fn validation_errors() {
        let bad = DifficultyProfile {
            random_move_probability: 1.5,
            depths: vec![2],
        };
        assert!(matches!(
            bad.validate(Difficulty::Easy),
            Err(ConfigError::InvalidProbability { tier: Difficulty::Easy, .. })
        ));

        let empty = DifficultyProfile {
            random_move_probability: 0.0,
            depths: vec![],
        };
        assert!(matches!(empty.validate(Difficulty::Hard), Err(ConfigError::EmptyDepths(_))));

        let zero = DifficultyProfile {
            random_move_probability: 0.0,
            depths: vec![0, 3],
        };
        assert!(matches!(zero.validate(Difficulty::Medium), Err(ConfigError::ZeroDepth(_))));
    }

    #[test]
    fn hard_draws_both_depths() {
        let profile = DifficultyProfile::hard();
        let mut rng = StdRng::seed_from_u64(7);
        let depths: Vec<u8> = (0..200).map(|_| profile.pick_depth(&mut rng)).collect();
        assert!(depths.contains(&4));
        assert!(depths.contains(&5));
        assert!(depths.iter().all(|d| *d == 4 || *d == 5));
        assert!(!profile.plays_random(&mut rng));
    }

    #[test]
    fn easy_random_branch_frequency() {
        let profile = DifficultyProfile::easy();
        let mut rng = StdRng::seed_from_u64(11);
        let hits = (0..1000).filter(|_| profile.plays_random(&mut rng)).count();
        assert!((600..=800).contains(&hits), "{} random picks", hits);
    }

    #[test]
    fn wrong_turn_yields_nothing() {
        let state = create_initial_state();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_move(&state, Color::Black, Difficulty::Easy, &mut rng), None);
    }

    #[test]
    fn always_random_profile_plays_legal_moves() {
        let config = SearchConfig {
            easy: DifficultyProfile {
                random_move_probability: 1.0,
                depths: vec![1],
            },
            ..SearchConfig::default()
        };
        let mut player = ComputerPlayer::new(config, StdRng::seed_from_u64(3));
        let state = create_initial_state();
        let legal = state.all_legal_moves(Color::White);
        for _ in 0..20 {
            let mv = player.choose_move(&state, Color::White, Difficulty::Easy).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn configured_time_budget_bounds_both_entry_points() {
        let config = SearchConfig {
            max_time_ms: Some(0),
            hard: DifficultyProfile {
                random_move_probability: 0.0,
                depths: vec![4],
            },
            ..SearchConfig::default()
        };
        let mut player = ComputerPlayer::new(config, StdRng::seed_from_u64(2));
        let state = create_initial_state();
        let first = state.all_legal_moves(Color::White)[0];

        let outcome = player.search(&state, Color::White, 4).unwrap();
        assert!(outcome.aborted);
        assert_eq!(outcome.mv, first);

        let mv = player.choose_move(&state, Color::White, Difficulty::Hard);
        assert_eq!(mv, Some(first));
    }

    #[test]
    fn explicit_deadline_wins_over_config() {
        let config = SearchConfig {
            max_time_ms: Some(0),
            ..SearchConfig::default()
        };
        let limits = SearchLimits::none().with_deadline(Instant::now() + Duration::from_secs(60));
        let player = ComputerPlayer::new(config, StdRng::seed_from_u64(2)).with_limits(limits);
        let state = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let outcome = player.search(&state, Color::White, 1).unwrap();
        assert!(!outcome.aborted);
        assert_eq!(outcome.mv.to_uci(), "a1a8");
    }

    #[test]
    fn search_only_profile_matches_best_move() {
        let config = SearchConfig {
            medium: DifficultyProfile {
                random_move_probability: 0.0,
                depths: vec![2],
            },
            ..SearchConfig::default()
        };
        let mut player = ComputerPlayer::new(config, StdRng::seed_from_u64(5));
        let state = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mv = player.choose_move(&state, Color::White, Difficulty::Medium).unwrap();
        assert_eq!(mv.to_uci(), "a1a8");
        assert_eq!(player.search(&state, Color::White, 1).map(|o| o.mv), Some(mv));
    }
}
